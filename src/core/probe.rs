use crate::config::toml_config::ReadinessConfig;
use crate::utils::error::{BenchError, Result};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::{sleep, timeout, Instant};

/// Wait until the target is ready to accept the benchmark runner.
///
/// `Delay` waits unconditionally. `Tcp` and `Http` poll on an interval and
/// give up with `ReadinessTimeout` once the overall timeout elapses.
pub async fn wait_ready(target: &str, readiness: &ReadinessConfig) -> Result<()> {
    match readiness {
        ReadinessConfig::Delay { seconds } => {
            tracing::debug!("{}: fixed {}s readiness delay", target, seconds);
            sleep(Duration::from_secs(*seconds)).await;
            Ok(())
        }
        ReadinessConfig::Tcp {
            host,
            port,
            timeout_seconds,
            interval_ms,
        } => {
            let addr = format!("{}:{}", host, port);
            let attempt = || {
                let addr = addr.clone();
                async move { TcpStream::connect(&addr).await.is_ok() }
            };
            poll(target, *timeout_seconds, *interval_ms, attempt).await
        }
        ReadinessConfig::Http {
            url,
            timeout_seconds,
            interval_ms,
        } => {
            let client = reqwest::Client::builder()
                .timeout(Duration::from_millis((*interval_ms).max(250)))
                .build()?;
            let attempt = || {
                let client = client.clone();
                let url = url.clone();
                async move {
                    match client.get(&url).send().await {
                        Ok(resp) => resp.status().is_success(),
                        Err(_) => false,
                    }
                }
            };
            poll(target, *timeout_seconds, *interval_ms, attempt).await
        }
    }
}

async fn poll<F, Fut>(target: &str, timeout_seconds: u64, interval_ms: u64, attempt: F) -> Result<()>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    let overall = Duration::from_secs(timeout_seconds);
    let interval = Duration::from_millis(interval_ms);
    let started = Instant::now();

    let probing = async {
        let mut tries: u32 = 0;
        loop {
            tries += 1;
            if attempt().await {
                tracing::debug!(
                    "{}: ready after {} probe(s) ({:.1}s)",
                    target,
                    tries,
                    started.elapsed().as_secs_f64()
                );
                return;
            }
            sleep(interval).await;
        }
    };

    match timeout(overall, probing).await {
        Ok(()) => Ok(()),
        Err(_) => Err(BenchError::ReadinessTimeout {
            target: target.to_string(),
            waited_secs: timeout_seconds,
        }),
    }
}
