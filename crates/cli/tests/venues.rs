//! Conformance checks every wired-in venue adapter must pass.

use sdk_commons::{Chain, SdkConfig};

fn assert_wired(sdk: &impl SdkConfig) {
    let pages = sdk.authorization_pages();
    assert!(pages.mainnet.starts_with("https://"));
    assert!(pages.testnet.starts_with("https://"));

    let chains = sdk.supported_chains();
    assert!(!chains.is_empty());
    for chain in chains {
        assert!(sdk.supports_chain(*chain));
    }
}

#[test]
fn ribbon_is_wired() {
    let sdk = ribbon_sdk::RibbonSdk;
    assert_wired(&sdk);
    assert!(sdk.supported_chains().iter().all(Chain::is_evm));
}

#[test]
fn opyn_is_wired() {
    let sdk = opyn_sdk::OpynSdk;
    assert_wired(&sdk);
    assert!(sdk.supported_chains().iter().all(Chain::is_evm));
}

#[test]
fn thetanuts_is_wired() {
    let sdk = thetanuts_sdk::ThetanutsSdk;
    assert_wired(&sdk);
    assert!(sdk.supported_chains().iter().all(Chain::is_evm));
}

#[test]
fn friktion_is_wired() {
    let sdk = friktion_sdk::FriktionSdk;
    assert_wired(&sdk);
    assert!(sdk.supported_chains().iter().all(Chain::is_solana));
}

#[test]
fn template_is_wired() {
    let sdk = template_sdk::TemplateSdk;
    assert_wired(&sdk);
    assert!(sdk.supported_chains().iter().all(Chain::is_evm));
}
