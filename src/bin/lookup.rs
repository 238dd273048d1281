//! Resolve a hostname to its IPv4 addresses.
//!
//! `lookup <hostname>` prints one line per resolved address. Exit code 1
//! on argument errors, 2 when resolution fails.

use std::process;

use clap::Parser;

use minihttpd::net::resolver;

#[derive(Parser)]
#[command(name = "lookup", about = "Print the IPv4 addresses of a hostname", long_about = None)]
struct Cli {
    /// Hostname to resolve.
    hostname: String,
}

#[tokio::main]
async fn main() {
    let cli = Cli::try_parse().unwrap_or_else(|e| {
        if e.use_stderr() {
            eprint!("{}", e);
            process::exit(1);
        }
        // --help / --version
        let _ = e.print();
        process::exit(0);
    });

    let addrs = match resolver::lookup_ipv4(&cli.hostname).await {
        Ok(addrs) => addrs,
        Err(e) => {
            eprintln!("lookup failed: {}", e);
            process::exit(2);
        }
    };

    println!("IP addresses for {}:\n", cli.hostname);
    for addr in addrs {
        println!("  IPv4: {}", addr);
    }
}
