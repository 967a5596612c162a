use crate::utils::config::parse_bool_flag;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeArgs {
    /// Log the resolved configuration and exit without touching the chain.
    pub explain_config: bool,
}

fn parse_runtime_args_from_iter<I, S>(args: I) -> anyhow::Result<RuntimeArgs>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let supplied_args = args
        .into_iter()
        .map(|arg| arg.as_ref().to_string())
        .collect::<Vec<_>>();
    if !supplied_args.is_empty() {
        return Err(anyhow::anyhow!(
            "CLI arguments are not supported. Configure .env keys instead (see .env.example). Received args: {}",
            supplied_args.join(" ")
        ));
    }

    let explain_config = std::env::var("EXPLAIN_CONFIG")
        .ok()
        .and_then(|raw| parse_bool_flag(&raw))
        .unwrap_or(false);

    Ok(RuntimeArgs { explain_config })
}

pub fn parse_runtime_args() -> anyhow::Result<RuntimeArgs> {
    parse_runtime_args_from_iter(std::env::args().skip(1))
}
