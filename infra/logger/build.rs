fn main() {
    // The console-subscriber layer only works on a tokio built with
    // `--cfg tokio_unstable`; warn at build time instead of failing at runtime.
    let wants_profiling = std::env::var_os("CARGO_FEATURE_PROFILING").is_some();
    let has_unstable_cfg = std::env::var_os("CARGO_CFG_TOKIO_UNSTABLE").is_some();
    if wants_profiling && !has_unstable_cfg {
        println!(
            "cargo:warning=dhub-logger `profiling` feature requires building with `--cfg tokio_unstable` \
             (set RUSTFLAGS=\"--cfg tokio_unstable\" or disable the feature)"
        );
    }

    println!("cargo:rerun-if-env-changed=CARGO_FEATURE_PROFILING");
    println!("cargo:rerun-if-env-changed=CARGO_CFG_TOKIO_UNSTABLE");
}
