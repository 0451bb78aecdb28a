use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use serde::Serialize;

use http_beacon::config::schema::DEFAULT_SERVER_NAME;
use http_beacon::http::SERVER_NAME;
use http_beacon::net::tls::install_crypto_provider;

#[derive(Parser)]
#[command(name = "beacon-probe")]
#[command(about = "Check that an http-beacon answers", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "https://127.0.0.1:8443/")]
    url: String,

    /// Accept self-signed or otherwise unverifiable certificates
    #[arg(short = 'k', long)]
    insecure: bool,

    /// Fail unless the Server-Name header has this value
    #[arg(long, num_args = 0..=1, default_missing_value = DEFAULT_SERVER_NAME)]
    expect_server_name: Option<String>,

    #[arg(long, default_value_t = 5)]
    timeout_secs: u64,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Report {
    url: String,
    healthy: bool,
    status: Option<u16>,
    server_name: Option<String>,
    latency_ms: u128,
    error: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let report = probe(&cli).await;

    if cli.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Error: failed to encode report: {}", e),
        }
    } else {
        print_report(&report);
    }

    if report.healthy {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

async fn probe(cli: &Cli) -> Report {
    let mut report = Report {
        url: cli.url.clone(),
        healthy: false,
        status: None,
        server_name: None,
        latency_ms: 0,
        error: None,
    };

    if let Err(e) = install_crypto_provider() {
        report.error = Some(e.to_string());
        return report;
    }

    let client = match reqwest::Client::builder()
        .danger_accept_invalid_certs(cli.insecure)
        .timeout(Duration::from_secs(cli.timeout_secs))
        .no_proxy()
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            report.error = Some(e.to_string());
            return report;
        }
    };

    let start = Instant::now();
    let res = client.get(&cli.url).send().await;
    report.latency_ms = start.elapsed().as_millis();

    let res = match res {
        Ok(res) => res,
        Err(e) => {
            report.error = Some(e.to_string());
            return report;
        }
    };

    report.status = Some(res.status().as_u16());
    report.server_name = res
        .headers()
        .get(SERVER_NAME)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let verdict = check(
        res.status(),
        report.server_name.as_deref(),
        cli.expect_server_name.as_deref(),
    );
    report.healthy = verdict.is_ok();
    report.error = verdict.err();
    report
}

/// Healthy means a `200` and, when one is expected, a matching Server-Name.
fn check(
    status: reqwest::StatusCode,
    server_name: Option<&str>,
    expected: Option<&str>,
) -> Result<(), String> {
    if status != reqwest::StatusCode::OK {
        return Err(format!("unexpected status: {}", status));
    }
    match expected {
        Some(expected) if server_name != Some(expected) => Err(format!(
            "unexpected Server-Name: {}",
            server_name.unwrap_or("<missing>")
        )),
        _ => Ok(()),
    }
}

fn print_report(report: &Report) {
    let verdict = if report.healthy { "UP" } else { "DOWN" };
    println!("{} {}", verdict, report.url);
    if let Some(status) = report.status {
        println!("  status:      {}", status);
    }
    if let Some(name) = &report.server_name {
        println!("  server-name: {}", name);
    }
    println!("  latency:     {} ms", report.latency_ms);
    if let Some(error) = &report.error {
        eprintln!("Error: {}", error);
    }
}
