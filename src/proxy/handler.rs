//! Proxy forwarding core.

use crate::proxy::fetcher::Fetcher;
use crate::proxy::outcome::ProxyOutcome;

/// Forward a GET for `target` and classify the result.
///
/// An absent or empty target never reaches the network. Nothing from the
/// inbound request besides the target string is used.
pub async fn forward(fetcher: &Fetcher, target: Option<&str>) -> ProxyOutcome {
    let Some(target) = target.filter(|t| !t.is_empty()) else {
        return ProxyOutcome::MissingParameter;
    };

    fetcher.fetch(target).await.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UpstreamConfig;

    fn fetcher() -> Fetcher {
        let config = UpstreamConfig {
            use_system_proxy: false,
            ..UpstreamConfig::default()
        };
        Fetcher::from_config(&config).unwrap()
    }

    #[tokio::test]
    async fn absent_and_empty_are_the_same() {
        let fetcher = fetcher();
        assert!(matches!(forward(&fetcher, None).await, ProxyOutcome::MissingParameter));
        assert!(matches!(forward(&fetcher, Some("")).await, ProxyOutcome::MissingParameter));
    }

    #[tokio::test]
    async fn schemeless_target_is_a_fetch_failure() {
        let outcome = forward(&fetcher(), Some("example.com/path")).await;
        match outcome {
            ProxyOutcome::FetchFailed(detail) => assert!(!detail.is_empty()),
            other => panic!("expected FetchFailed, got {other:?}"),
        }
    }
}
