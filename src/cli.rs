// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// The CLI is the only configuration layer: it collects the target URL, the
// two list files, the header string and the thread count, and turns them
// into a validated `Target` before anything touches the network.
// =============================================================================

use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use crate::target::{load_list, parse_headers, BlankLines, Target, TargetError, TargetSpec};

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
#[derive(Parser, Debug)]
#[command(
    name = "dirb",
    version,
    about = "Enumerate hidden web paths from a wordlist and a list of extensions",
    long_about = "dirb probes a target with every combination of a wordlist and a list of \
                  extensions using HEAD requests, and reports paths answering 200 or 403."
)]
pub struct Cli {
    /// Target URL (e.g., https://example.com/app/)
    #[arg(short = 'u', long = "url")]
    pub url: String,

    /// Path to the wordlist, one word per line
    #[arg(short = 'f', long = "wordlist")]
    pub wordlist: PathBuf,

    /// Path to a list of extensions, one per line (an empty line means "no extension")
    #[arg(short = 'e', long = "extensions")]
    pub extensions: PathBuf,

    /// Number of concurrent requests
    #[arg(short = 't', long = "threads", default_value_t = 1)]
    pub threads: usize,

    /// Headers, with '|' as the delimiter (e.g. "User-Agent : BLAH | Referer : AAAAA")
    #[arg(short = 'H', long = "headers", default_value = "")]
    pub headers: String,

    /// Validate TLS certificates (off by default so self-signed targets can be scanned)
    #[arg(long)]
    pub verify_tls: bool,

    /// Ignore the empty entry produced when a list file ends with a newline
    #[arg(long)]
    pub drop_trailing_blank: bool,

    /// Also print every match as a JSON line on stdout
    #[arg(long)]
    pub json: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    fn blank_lines(&self) -> BlankLines {
        if self.drop_trailing_blank {
            BlankLines::DropTrailing
        } else {
            BlankLines::Keep
        }
    }

    // Loads both lists and validates everything into a Target
    //
    // Cheap checks run first so a bad thread count or header string is
    // reported without reading the list files.
    pub async fn build_target(&self) -> Result<Target, TargetError> {
        match self.threads {
            0 => return Err(TargetError::InvalidConcurrency(0)),
            1 => info!("Default to 1 thread"),
            n => info!("Using {} threads", n),
        }

        let headers = parse_headers(&self.headers)?;
        info!("Headers are set to: {:?}", headers);

        let words = load_list(&self.wordlist, self.blank_lines()).await?;
        let extensions = load_list(&self.extensions, self.blank_lines()).await?;

        let mut spec = TargetSpec::new(self.url.clone(), words, extensions);
        spec.headers = headers;
        spec.concurrency = self.threads;
        spec.verify_tls = self.verify_tls;

        let target = Target::new(spec)?;
        info!("{}", target.base_url());

        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_short_flags() {
        let cli = Cli::try_parse_from([
            "dirb", "-u", "http://example.com", "-f", "words.txt", "-e", "exts.txt", "-t", "8",
            "-H", "User-Agent: x",
        ])
        .unwrap();

        assert_eq!(cli.url, "http://example.com");
        assert_eq!(cli.wordlist, PathBuf::from("words.txt"));
        assert_eq!(cli.extensions, PathBuf::from("exts.txt"));
        assert_eq!(cli.threads, 8);
        assert_eq!(cli.headers, "User-Agent: x");
        assert!(!cli.verify_tls);
        assert_eq!(cli.blank_lines(), BlankLines::Keep);
    }

    #[test]
    fn test_defaults() {
        let cli =
            Cli::try_parse_from(["dirb", "-u", "http://x", "-f", "w", "-e", "e"]).unwrap();
        assert_eq!(cli.threads, 1);
        assert_eq!(cli.headers, "");
        assert_eq!(cli.verbose, 0);
        assert!(!cli.json);
    }

    #[test]
    fn test_missing_required_args() {
        assert!(Cli::try_parse_from(["dirb", "-u", "http://x"]).is_err());
        assert!(Cli::try_parse_from(["dirb", "-f", "w", "-e", "e"]).is_err());
    }

    #[tokio::test]
    async fn test_build_target_from_files() {
        let dir = std::env::temp_dir();
        let words = dir.join(format!("dirb-cli-words-{}.txt", std::process::id()));
        let exts = dir.join(format!("dirb-cli-exts-{}.txt", std::process::id()));
        tokio::fs::write(&words, "admin\nlogin\n").await.unwrap();
        tokio::fs::write(&exts, "\n.php\n").await.unwrap();

        let cli = Cli::try_parse_from([
            "dirb",
            "-u",
            "http://example.com/app",
            "-f",
            words.to_str().unwrap(),
            "-e",
            exts.to_str().unwrap(),
            "-t",
            "4",
            "-H",
            "User-Agent : test | X-Foo:bar",
            "--drop-trailing-blank",
        ])
        .unwrap();

        let target = cli.build_target().await.unwrap();
        assert_eq!(target.words(), ["admin", "login"]);
        assert_eq!(target.extensions(), ["", ".php"]);
        assert_eq!(target.concurrency().get(), 4);
        assert_eq!(target.headers().len(), 2);

        tokio::fs::remove_file(&words).await.unwrap();
        tokio::fs::remove_file(&exts).await.unwrap();
    }

    #[tokio::test]
    async fn test_zero_threads_rejected() {
        let cli = Cli::try_parse_from(["dirb", "-u", "http://x", "-f", "w", "-e", "e", "-t", "0"])
            .unwrap();
        assert!(matches!(
            cli.build_target().await,
            Err(TargetError::InvalidConcurrency(0))
        ));
    }

    #[tokio::test]
    async fn test_malformed_header_rejected_before_loading_files() {
        let cli = Cli::try_parse_from([
            "dirb", "-u", "http://x", "-f", "missing", "-e", "missing", "-H", "no colon",
        ])
        .unwrap();
        assert!(matches!(
            cli.build_target().await,
            Err(TargetError::MalformedHeader(_))
        ));
    }
}
