use std::fs;
use std::path::Path;

fn write_env_template(file: &mut fs::File) -> std::io::Result<()> {
    use std::io::Write;
    writeln!(file, "# quest_runner configuration")?;
    writeln!(file)?;
    writeln!(file, "RPC_URL=\"https://subnets.avax.network/defi-kingdoms/dfk-chain/rpc\"")?;
    writeln!(file, "BACKUP_RPC_URL=\"\"")?;
    writeln!(file, "USE_BACKUP_RPC=\"false\"")?;
    writeln!(file, "CHAIN_ID=\"53935\"")?;
    writeln!(file)?;
    writeln!(file, "WALLET_ADDRESS=\"0xCHANGE_ME\"")?;
    writeln!(file, "# Either a raw key or an encrypted JSON keystore.")?;
    writeln!(file, "ETH_PRIVATE_KEY=\"\"")?;
    writeln!(file, "WALLET_KEYSTORE_PATH=\"\"")?;
    writeln!(file, "WALLET_PASSWORD=\"\"")?;
    writeln!(file)?;
    writeln!(file, "QUEST_CONTRACT=\"0xCHANGE_ME\"")?;
    writeln!(file, "ITEM_CONTRACT=\"0xCHANGE_ME\"")?;
    writeln!(file, "HERO_CONTRACT=\"0xCHANGE_ME\"")?;
    writeln!(file, "GAS_PRICE_WEI=\"30000000000\"")?;
    writeln!(file, "GAS_LIMIT=\"3000000\"")?;
    writeln!(file)?;
    writeln!(file, "QUESTS_FILE=\"./quests.json\"")?;
    writeln!(file, "POLLING_INTERVAL_MS=\"60000\"")?;
    writeln!(file, "MAX_QUEST_GROUP_SIZE=\"6\"")?;
    writeln!(file, "MIN_STAMINA=\"15\"")?;
    writeln!(file, "QUEST_ATTEMPTS=\"5\"")?;
    writeln!(file)?;
    writeln!(file, "RUST_LOG=\"info,quest_runner=info\"")?;
    Ok(())
}

fn unquote(value: &str) -> &str {
    let quoted = value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')));
    if quoted {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

/// Parses `KEY=value` lines; blank lines, comments and malformed lines are skipped.
pub fn parse_env_lines(content: &str) -> Vec<(String, String)> {
    content
        .lines()
        .filter_map(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                return None;
            }
            let (key, value) = trimmed.split_once('=')?;
            let key = key.trim();
            if key.is_empty() {
                return None;
            }
            let value_no_comment = value.split(" #").next().unwrap_or("").trim();
            Some((key.to_string(), unquote(value_no_comment).to_string()))
        })
        .collect()
}

fn load_dot_env(path: &Path) {
    if !path.exists() {
        return;
    }

    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("[ENV] Failed to read {}: {}", path.display(), e);
            return;
        }
    };

    for (key, value) in parse_env_lines(&content) {
        // Explicit process environment wins over the file.
        if std::env::var_os(&key).is_some() {
            continue;
        }
        std::env::set_var(key, value);
    }
}

fn ensure_env_example_exists() {
    let env_example = Path::new(".env.example");
    if env_example.exists() {
        return;
    }
    if let Ok(mut file) = fs::File::create(env_example) {
        let _ = write_env_template(&mut file);
    }
}

pub fn harden_env_setup() {
    ensure_env_example_exists();
    load_dot_env(Path::new(".env"));
    for key in ["RPC_URL", "WALLET_ADDRESS", "QUESTS_FILE"] {
        if std::env::var(key).is_err() {
            eprintln!("[ENV] WARN: {key} is not set");
        }
    }
}
