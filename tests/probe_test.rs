use benchctl::config::toml_config::ReadinessConfig;
use benchctl::core::probe::wait_ready;
use benchctl::BenchError;
use httpmock::prelude::*;
use tokio::net::TcpListener;

#[tokio::test]
async fn tcp_probe_succeeds_against_listening_port() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let readiness = ReadinessConfig::Tcp {
        host: "127.0.0.1".to_string(),
        port,
        timeout_seconds: 5,
        interval_ms: 50,
    };
    wait_ready("timescaledb", &readiness).await.unwrap();
}

#[tokio::test]
async fn tcp_probe_times_out_when_nothing_listens() {
    // Grab a free port, then close it again.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let readiness = ReadinessConfig::Tcp {
        host: "127.0.0.1".to_string(),
        port,
        timeout_seconds: 1,
        interval_ms: 50,
    };
    let err = wait_ready("mssql_narrow", &readiness).await.unwrap_err();
    match err {
        BenchError::ReadinessTimeout {
            target,
            waited_secs,
        } => {
            assert_eq!(target, "mssql_narrow");
            assert_eq!(waited_secs, 1);
        }
        other => panic!("expected ReadinessTimeout, got {:?}", other),
    }
}

#[tokio::test]
async fn http_probe_accepts_2xx() {
    let server = MockServer::start();
    let ping = server.mock(|when, then| {
        when.method(GET).path("/ping");
        then.status(204);
    });

    let readiness = ReadinessConfig::Http {
        url: server.url("/ping"),
        timeout_seconds: 5,
        interval_ms: 50,
    };
    wait_ready("influxdb", &readiness).await.unwrap();
    ping.assert_hits(1);
}

#[tokio::test]
async fn http_probe_keeps_polling_on_5xx_until_timeout() {
    let server = MockServer::start();
    let ping = server.mock(|when, then| {
        when.method(GET).path("/ping");
        then.status(503);
    });

    let readiness = ReadinessConfig::Http {
        url: server.url("/ping"),
        timeout_seconds: 1,
        interval_ms: 100,
    };
    let err = wait_ready("influxdb", &readiness).await.unwrap_err();
    assert!(matches!(err, BenchError::ReadinessTimeout { .. }));
    // Polled more than once before giving up.
    assert!(ping.hits() > 1);
}

#[tokio::test(start_paused = true)]
async fn delay_probe_waits_the_configured_interval() {
    let started = tokio::time::Instant::now();
    wait_ready("questdb", &ReadinessConfig::Delay { seconds: 10 })
        .await
        .unwrap();
    assert!(started.elapsed() >= std::time::Duration::from_secs(10));
}
