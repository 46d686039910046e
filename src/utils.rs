use std::env::var;
use std::net::SocketAddr;

use anyhow::Result;

/// Get the value of ENV var, or a default
///
/// Empty values are treated as not set
pub fn env_var_or_else(var_name: &'static str, or_else: fn() -> String) -> String {
    non_empty(var(var_name).ok()).unwrap_or_else(or_else)
}

/// Parse the listening address
///
/// A non-empty `port` overrides the port of `address`
pub fn parse_address(address: &str, port: &str) -> Result<SocketAddr> {
    let mut address = address.parse::<SocketAddr>()?;

    if !port.is_empty() {
        address.set_port(port.parse::<u16>()?);
    }

    Ok(address)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}
