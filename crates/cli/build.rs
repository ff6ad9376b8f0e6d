use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("sitelens")
        .version("1.0.0")
        .author("Sitelens Contributors")
        .about("Analyze web page structure and link reachability")
        .arg(clap::arg!(<URL> "URL to analyze (http:// or https://)"))
        .arg(
            clap::arg!(-f --format <FORMAT> "Output format (text, json)")
                .value_name("FORMAT")
                .default_value("text")
                .value_parser(["text", "json"]),
        )
        .arg(clap::arg!(--timeout <SECS> "Render timeout in seconds").default_value("60"))
        .arg(clap::arg!(--"probe-timeout" <SECS> "Per-link probe timeout in seconds").default_value("3"))
        .arg(clap::arg!(--concurrency <NUM> "Maximum concurrent link probes").default_value("10"))
        .arg(clap::arg!(--"user-agent" <UA> "Custom User-Agent for probe requests").value_name("UA"))
        .arg(
            clap::arg!(--"cache-dir" <DIR> "Cache directory for rendered content")
                .value_name("DIR")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(clap::arg!(-v --verbose "Enable verbose output"));

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "sitelens", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "sitelens", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "sitelens", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "sitelens", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
