#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
//! Squidpanel UI wasm entry point and native stub fallback.

#[cfg(target_arch = "wasm32")]
fn main() -> Result<(), std::io::Error> {
    squidpanel_ui::run_app();
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), std::io::Error> {
    use squidpanel_ui::core::config::{BUILD_TIME_API_BASE_URL, resolve_api_base_url};
    use std::io::{self, Write};

    let backend = resolve_api_base_url(None, BUILD_TIME_API_BASE_URL);
    let mut stderr = io::stderr().lock();
    writeln!(
        stderr,
        "squidpanel-ui runs in the browser; build it with `trunk build` or `cargo build --target wasm32-unknown-unknown`."
    )?;
    writeln!(
        stderr,
        "The bundle will talk to {backend}; set SQUIDPANEL_API_BASE_URL at build time to change it."
    )?;
    Ok(())
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn native_main_writes_warning() -> std::io::Result<()> {
        main()
    }
}
