//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `sideload_core` linkage.
//! - Offer a quick identity-parse probe for deployment debugging.

fn main() {
    let mut args = std::env::args().skip(1);
    if let Some(request) = args.next() {
        match sideload_core::ModuleIdentity::parse(&request) {
            Ok(identity) => {
                println!("short_name={}", identity.short_name());
            }
            Err(err) => {
                eprintln!("invalid request identity: {err}");
                std::process::exit(1);
            }
        }
        return;
    }

    println!("sideload_core ping={}", sideload_core::ping());
    println!("sideload_core version={}", sideload_core::core_version());
}
