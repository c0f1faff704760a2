//! Interactive `order` session.
//!
//! Walks a [`Checkout`] from address to placement, prompting for whatever
//! the command line did not supply. The first failure ends the session,
//! except for an unrecognised pizza size, which is asked again.

use std::io::{BufRead, Write};

use anyhow::Context;
use pizzeria_client::{Checkout, CheckoutError, PowerClient};
use pizzeria_core::{resolve_size, topping_names, Address, Customer};

use crate::prompt::Prompter;
use crate::OrderArgs;

const LIST_TOPPINGS: &str = "ls";

/// Runs one ordering session end to end.
///
/// Declining the price confirmation ends the session without an error.
///
/// # Errors
///
/// Returns an error on the first failed prompt, remote call, or invalid
/// store choice.
pub(crate) async fn run_order<R: BufRead, W: Write>(
    client: &PowerClient,
    prompter: &mut Prompter<R, W>,
    args: OrderArgs,
) -> anyhow::Result<()> {
    let dry_run = args.dry_run;
    let address = collect_address(prompter, args)?;

    let mut checkout = Checkout::new(client);
    checkout.set_address(address)?;

    let stores = checkout
        .locate_stores()
        .await
        .context("failed to find a store near you")?;
    let listing: Vec<String> = stores
        .iter()
        .enumerate()
        .map(|(i, store)| format!("{}) {}", i + 1, store.display_line()))
        .collect();
    for line in &listing {
        prompter.say(line)?;
    }

    let answer = prompter.ask("Choose a location")?;
    let choice: usize = answer
        .parse()
        .with_context(|| format!("'{answer}' is not a store number"))?;
    let store = checkout.select_store(choice)?;
    tracing::debug!(store_id = %store.id, "using store");

    loop {
        add_pizza(&mut checkout, prompter)?;
        if !prompter.confirm("Do you want to add another pizza?")? {
            break;
        }
    }

    checkout
        .validate()
        .await
        .context("the order could not be validated")?;
    let total = checkout
        .price()
        .await
        .context("the order could not be priced")?;

    let accepted = prompter.confirm(&format!("Your total is ${total}. Place order?"))?;
    match checkout.confirm(accepted) {
        Ok(()) => {}
        Err(CheckoutError::UserAbort) => {
            prompter.say("Order cancelled; nothing was placed.")?;
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    }

    checkout.set_customer(collect_customer(prompter)?)?;

    if dry_run {
        let body = checkout.order().to_request_body()?;
        let pretty: serde_json::Value = serde_json::from_slice(&body)?;
        prompter.say("dry-run: would place this order:")?;
        prompter.say(serde_json::to_string_pretty(&pretty)?)?;
        return Ok(());
    }

    let placed = checkout
        .place()
        .await
        .context("the order could not be placed")?;
    match placed.order_id {
        Some(id) => prompter.say(format!("Your order has been placed! Order id: {id}"))?,
        None => prompter.say("Your order has been placed!")?,
    }
    Ok(())
}

fn collect_address<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    args: OrderArgs,
) -> anyhow::Result<Address> {
    Ok(Address {
        street: prompter.ask_unless(args.street, "Street address")?,
        city: prompter.ask_unless(args.city, "City")?,
        region: prompter.ask_unless(args.region, "Province/region")?,
        postal_code: prompter.ask_unless(args.postal_code, "Postal code")?,
        dwelling_type: prompter.ask_unless(args.dwelling_type, "Dwelling type (House, Apartment)")?,
    })
}

fn collect_customer<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
) -> anyhow::Result<Customer> {
    let first_name = prompter.ask_required("First name")?;
    let last_name = prompter.ask_required("Last name")?;
    let email = prompter.ask_required("Email")?;
    let phone = prompter.ask_required("Phone number")?;
    Ok(Customer::new(&first_name, &last_name, &email, &phone))
}

fn add_pizza<R: BufRead, W: Write>(
    checkout: &mut Checkout<'_>,
    prompter: &mut Prompter<R, W>,
) -> anyhow::Result<()> {
    let size = loop {
        let answer = prompter.ask("Choose a size (s, m, l)")?;
        if resolve_size(&answer).is_some() {
            break answer;
        }
        prompter.say(format!("'{answer}' is not a size we make."))?;
    };

    let toppings = loop {
        let answer = prompter.ask("Choose toppings (comma-separated list). Type ls for options")?;
        if answer.eq_ignore_ascii_case(LIST_TOPPINGS) {
            prompter.say(topping_names().collect::<Vec<_>>().join(", "))?;
            continue;
        }
        break answer;
    };

    let item = checkout.add_pizza(&size, &[toppings])?;
    tracing::debug!(id = item.id, toppings = item.toppings.len(), "pizza added");
    Ok(())
}
