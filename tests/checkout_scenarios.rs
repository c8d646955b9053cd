//! Integration test for the standard two-seller checkout scenario.
//!
//! The `standard` fixture set seeds:
//!
//! - Rosie's Vintage shipping with Tracked 48 (0–2kg at £4.95)
//! - Kit's Records shipping with Letter Post (0–1kg at £2.95)
//! - A single buyer protection tier: £0–£100 at 5%
//! - A basket of a £50.00 / 1.5kg jacket from Rosie and a £20.00 / 500g
//!   record from Kit (referenced by legacy shop name)
//!
//! Expected once both sellers' options are selected:
//!
//! - Subtotal: £70.00 (7000 pence)
//! - Shipping: £4.95 + £2.95 = £7.90 (790 pence)
//! - Buyer protection: 5% of £50 + 5% of £20 = £3.50 (350 pence)
//! - Total: £81.40 (8140 pence)
//!
//! Before the selections are made the gate must be closed and shipping must
//! contribute zero.

use testresult::TestResult;

use gavel::{
    checkout::{CheckoutStage, CheckoutState, Destination},
    fixtures::Fixture,
    items::groups::SellerGroups,
    shipping::options::resolve_options,
    summary::compute_summary,
};

#[test]
fn standard_scenario_reaches_expected_totals() -> TestResult {
    let fixture = Fixture::from_set("standard")?;
    let basket = fixture.basket()?;
    let groups = SellerGroups::from(&basket);

    // The legacy shop-name reference must resolve at load time.
    assert!(!basket.has_unresolved_sellers());
    assert_eq!(groups.len(), 2);

    let mut state = CheckoutState::new();
    state.set_destination(Destination::domestic("GB"));

    let options = resolve_options(
        &groups,
        fixture.directory(),
        Some(fixture.rates()),
        state.destination(),
    );

    let before = compute_summary(&basket, &groups, &options, &state, fixture.tiers())?;

    assert_eq!(before.subtotal().to_minor_units(), 7000);
    assert_eq!(before.total_shipping().to_minor_units(), 0);
    assert_eq!(before.protection_fee().to_minor_units(), 350);
    assert_eq!(before.stage(), CheckoutStage::MissingOptions);
    assert!(
        !before.can_checkout(),
        "checkout must stay blocked until every seller has a selection"
    );

    // Each seller has exactly one option; select them.
    for entry in &options {
        let selected = entry
            .options()
            .first()
            .map(|option| state.select(entry.seller(), option.provider()));

        assert!(selected.is_some(), "each seller should have one option");
    }

    let after = compute_summary(&basket, &groups, &options, &state, fixture.tiers())?;

    assert_eq!(after.subtotal().to_minor_units(), 7000);
    assert_eq!(after.total_shipping().to_minor_units(), 790);
    assert_eq!(after.protection_fee().to_minor_units(), 350);
    assert_eq!(after.total().to_minor_units(), 8140);
    assert_eq!(after.stage(), CheckoutStage::AllOptionsSelected);
    assert!(after.can_checkout());

    Ok(())
}

#[test]
fn partial_selection_keeps_the_gate_closed() -> TestResult {
    let fixture = Fixture::from_set("standard")?;
    let basket = fixture.basket()?;
    let groups = SellerGroups::from(&basket);

    let mut state = CheckoutState::new();
    state.set_destination(Destination::domestic("GB"));

    let options = resolve_options(
        &groups,
        fixture.directory(),
        Some(fixture.rates()),
        state.destination(),
    );

    // Select for the first seller only.
    if let Some(entry) = options.first() {
        if let Some(option) = entry.options().first() {
            state.select(entry.seller(), option.provider());
        }
    }

    let summary = compute_summary(&basket, &groups, &options, &state, fixture.tiers())?;

    assert_eq!(summary.stage(), CheckoutStage::MissingOptions);
    assert!(!summary.can_checkout());

    // Only the selected seller's shipping is counted.
    assert!(summary.total_shipping().to_minor_units() > 0);
    assert!(summary.total_shipping().to_minor_units() < 790);

    Ok(())
}

#[test]
fn no_destination_blocks_regardless_of_selections() -> TestResult {
    let fixture = Fixture::from_set("standard")?;
    let basket = fixture.basket()?;
    let groups = SellerGroups::from(&basket);

    let state = CheckoutState::new();

    let options = resolve_options(&groups, fixture.directory(), Some(fixture.rates()), None);

    let summary = compute_summary(&basket, &groups, &options, &state, fixture.tiers())?;

    assert_eq!(summary.stage(), CheckoutStage::NoDestination);
    assert!(!summary.can_checkout());

    Ok(())
}

#[test]
fn summary_is_stable_across_recomputation() -> TestResult {
    let fixture = Fixture::from_set("standard")?;
    let basket = fixture.basket()?;
    let groups = SellerGroups::from(&basket);

    let mut state = CheckoutState::new();
    state.set_destination(Destination::domestic("GB"));

    let options = resolve_options(
        &groups,
        fixture.directory(),
        Some(fixture.rates()),
        state.destination(),
    );

    for entry in &options {
        if let Some(option) = entry.options().first() {
            state.select(entry.seller(), option.provider());
        }
    }

    let first = compute_summary(&basket, &groups, &options, &state, fixture.tiers())?;
    let second = compute_summary(&basket, &groups, &options, &state, fixture.tiers())?;

    assert_eq!(first.total(), second.total());
    assert_eq!(first.can_checkout(), second.can_checkout());
    assert_eq!(first.shipping_lines(), second.shipping_lines());

    Ok(())
}
