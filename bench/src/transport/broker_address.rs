use crate::error::BenchError;
use std::fmt;
use std::str::FromStr;

const DEFAULT_PORT: u16 = 1883;
const DEFAULT_TLS_PORT: u16 = 8883;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokerAddress {
    pub host: String,
    pub port: u16,
    pub tls: bool,
}

impl FromStr for BrokerAddress {
    type Err = BenchError;

    /// Accepts `scheme://host[:port]` or a bare `host[:port]`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| BenchError::InvalidBrokerAddress(format!("{s}: {reason}"));

        let (scheme, rest) = match s.split_once("://") {
            Some((scheme, rest)) => (scheme.to_ascii_lowercase(), rest),
            None => ("tcp".to_owned(), s),
        };
        let tls = match scheme.as_str() {
            "tcp" | "mqtt" => false,
            "ssl" | "tls" | "mqtts" => true,
            _ => return Err(invalid("unsupported scheme")),
        };

        let rest = rest.trim_end_matches('/');
        let (host, port) = if let Some(bracketed) = rest.strip_prefix('[') {
            let (host, after) = bracketed
                .split_once(']')
                .ok_or_else(|| invalid("unterminated IPv6 address"))?;
            match after {
                "" => (host, None),
                _ => match after.strip_prefix(':') {
                    Some(port) => (host, Some(port)),
                    None => return Err(invalid("unexpected characters after IPv6 address")),
                },
            }
        } else {
            match rest.rsplit_once(':') {
                Some((host, port)) => (host, Some(port)),
                None => (rest, None),
            }
        };

        if host.is_empty() {
            return Err(invalid("missing host"));
        }

        let port = match port {
            Some(port) => port.parse::<u16>().map_err(|_| invalid("invalid port"))?,
            None if tls => DEFAULT_TLS_PORT,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host: host.to_owned(),
            port,
            tls,
        })
    }
}

impl fmt::Display for BrokerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scheme = if self.tls { "ssl" } else { "tcp" };
        if self.host.contains(':') {
            write!(f, "{scheme}://[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{scheme}://{}:{}", self.host, self.port)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_default_broker() {
        let address: BrokerAddress = "tcp://localhost:1883".parse().unwrap();
        assert_eq!(
            address,
            BrokerAddress {
                host: "localhost".to_owned(),
                port: 1883,
                tls: false,
            }
        );
    }

    #[test]
    fn should_apply_scheme_default_ports() {
        let plain: BrokerAddress = "mqtt://broker".parse().unwrap();
        assert_eq!(plain.port, 1883);
        assert!(!plain.tls);

        let secure: BrokerAddress = "ssl://broker.example.com".parse().unwrap();
        assert_eq!(secure.port, 8883);
        assert!(secure.tls);
    }

    #[test]
    fn should_accept_bare_host_and_ipv6() {
        let bare: BrokerAddress = "10.0.0.5:1884".parse().unwrap();
        assert_eq!(bare.host, "10.0.0.5");
        assert_eq!(bare.port, 1884);

        let ipv6: BrokerAddress = "tcp://[::1]:1885".parse().unwrap();
        assert_eq!(ipv6.host, "::1");
        assert_eq!(ipv6.port, 1885);
        assert_eq!(ipv6.to_string(), "tcp://[::1]:1885");
    }

    #[test]
    fn should_reject_invalid_addresses() {
        assert!("ws://localhost:1883".parse::<BrokerAddress>().is_err());
        assert!("tcp://localhost:notaport".parse::<BrokerAddress>().is_err());
        assert!("tcp://:1883".parse::<BrokerAddress>().is_err());
        assert!("tcp://[::1".parse::<BrokerAddress>().is_err());
    }
}
