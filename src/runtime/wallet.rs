use crate::utils::config::WalletSource;
use crate::utils::hex::clean_hex;
use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use std::str::FromStr;

pub fn load_signer(source: &WalletSource) -> anyhow::Result<PrivateKeySigner> {
    match source {
        WalletSource::PrivateKey(pk) => PrivateKeySigner::from_str(clean_hex(pk))
            .map_err(|err| anyhow::anyhow!("ETH_PRIVATE_KEY is not a valid secp256k1 key: {err}")),
        WalletSource::Keystore { path, password } => {
            PrivateKeySigner::decrypt_keystore(path, password).map_err(|err| {
                anyhow::anyhow!(
                    "Unable to read encrypted wallet `{}`. Check WALLET_PASSWORD: {err}",
                    path.display()
                )
            })
        }
    }
}

/// The configured account is the one whose quests are read; it must also be the signer.
pub fn ensure_signer_matches(signer: &PrivateKeySigner, account: Address) -> anyhow::Result<()> {
    if signer.address() != account {
        anyhow::bail!(
            "wallet key controls {:#x} but WALLET_ADDRESS is {:#x}",
            signer.address(),
            account
        );
    }
    Ok(())
}
