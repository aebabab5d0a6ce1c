//! Send a few records to a Logstash endpoint.
//!
//! ```text
//! cargo run -p logservice --example emit -- --host 127.0.0.1 --port 5000 --console
//! ```

use clap::Parser;
use logservice::{Level, LogService, LogServiceConfig};
use serde::Serialize;
use serde_json::json;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(about = "Emit sample records through a LogService")]
struct Args {
    /// Name stamped on every record
    #[arg(long, default_value = "demo", env = "LOGSERVICE_NAME")]
    service_name: String,

    /// Logstash host
    #[arg(long, default_value = "127.0.0.1", env = "LOGSTASH_HOST")]
    host: String,

    /// Logstash port
    #[arg(long, default_value_t = 5000, env = "LOGSTASH_PORT")]
    port: u16,

    /// Minimum level: debug, info, warn or error
    #[arg(long, default_value = "info")]
    level: Level,

    /// Connect over TLS
    #[arg(long)]
    ssl: bool,

    /// Reconnection attempts; -1 retries forever
    #[arg(long, default_value_t = 3, allow_negative_numbers = true)]
    max_connect_retries: i32,

    /// Echo records to stdout
    #[arg(long)]
    console: bool,

    /// Indent JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Serialize)]
struct Order {
    id: u64,
    customer: Customer,
}

#[derive(Serialize)]
struct Customer {
    name: String,
    address: Address,
}

#[derive(Serialize)]
struct Address {
    city: String,
}

#[derive(Debug, thiserror::Error)]
#[error("charge failed")]
struct ChargeError(#[source] std::io::Error);

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let config = LogServiceConfig::builder(args.service_name, args.host, args.port)
        .level(args.level)
        .ssl_enable(args.ssl)
        .max_connect_retries(args.max_connect_retries)
        .enable_console(args.console)
        .pretty_print(args.pretty)
        .callback(|level, message| eprintln!("[hook] {level}: {message}"))
        .build();
    let logs = LogService::new(config);
    logs.log_unhandled_errors();

    logs.info("service started", Some(json!({ "pid": std::process::id() })));
    logs.warn("low balance", Some(json!({ "account": 42 })));
    logs.debug("only shown at debug", None);

    let request = logs.context_logger("req-7f3a");
    request.info("charge accepted", Some(json!({ "amount": 1250 })));

    logs.log_nested_object(
        &Order {
            id: 7,
            customer: Customer {
                name: "Ann".to_string(),
                address: Address {
                    city: "Lisbon".to_string(),
                },
            },
        },
        1,
    );

    let err = ChargeError(std::io::Error::other("card declined"));
    logs.log_stack_trace(&err);

    // Give the sink a moment to drain before the runtime shuts down
    logs.flush();
    tokio::time::sleep(Duration::from_millis(500)).await;
}
