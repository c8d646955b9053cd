//! Checkout Example
//!
//! Walks a fixture basket through the checkout flow: group rows by seller,
//! resolve shipping options against the weight bands, auto-select the
//! cheapest option per seller, and print the order summary.
//!
//! Use `-f` to load a fixture set by name
//! Use `-c` to set the destination country code
//! Use `-i` to treat the destination as international

use std::{io, time::Instant};

use anyhow::Result;
use clap::Parser;
use humanize_duration::{Truncate, prelude::DurationExt};

use gavel::{
    checkout::{CheckoutState, Destination},
    fixtures::Fixture,
    items::groups::SellerGroups,
    shipping::options::resolve_options,
    summary::compute_summary,
    utils::DemoCheckoutArgs,
};

/// Checkout Example
#[expect(clippy::print_stdout, reason = "Example program output to user")]
pub fn main() -> Result<()> {
    let args = DemoCheckoutArgs::parse();

    let fixture = Fixture::from_set(&args.fixture)?;
    let basket = fixture.basket()?;
    let groups = SellerGroups::from(&basket);

    let mut state = CheckoutState::new();

    state.set_destination(if args.international {
        Destination::international(&args.country)
    } else {
        Destination::domestic(&args.country)
    });

    let start = Instant::now();

    let options = resolve_options(
        &groups,
        fixture.directory(),
        Some(fixture.rates()),
        state.destination(),
    );

    for entry in &options {
        let seller_name = fixture
            .directory()
            .get(entry.seller())
            .map_or("<unknown>", |seller| seller.name.as_str());

        println!("\n{seller_name} ({}):", entry.total_weight());

        if entry.options().is_empty() {
            println!("  no shipping options");
        }

        for option in entry.options() {
            let Some(provider) = fixture.rates().provider(option.provider()) else {
                continue;
            };

            let (min, max) = provider.estimated_days.window();

            println!(
                "  {} — {} (est. {} to {})",
                provider.name,
                option.price(),
                min.human(Truncate::Day),
                max.human(Truncate::Day),
            );
        }

        // Pick the cheapest offerable option for the demo.
        let cheapest = entry
            .options()
            .iter()
            .min_by_key(|option| option.price().to_minor_units());

        if let Some(option) = cheapest {
            state.select(entry.seller(), option.provider());
        }
    }

    state.sync(&groups, &options);

    let summary = compute_summary(&basket, &groups, &options, &state, fixture.tiers())?;

    let elapsed = start.elapsed();

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    summary.write_to(&mut handle, fixture.directory())?;

    println!("\nResolved in {}", elapsed.human(Truncate::Micro));

    Ok(())
}
