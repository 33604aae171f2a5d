use crate::error::StartupError;

/// Reads the hostname the OS reports for this machine.
pub fn resolve() -> Result<String, StartupError> {
    let hostname = nix::unistd::gethostname().map_err(StartupError::Hostname)?;
    hostname.into_string().map_err(StartupError::HostnameEncoding)
}

pub fn hosted_name_line(hostname: &str) -> String {
    format!("hosted-name {hostname}")
}
