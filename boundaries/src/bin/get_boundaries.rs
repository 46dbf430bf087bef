//! Download the IAU constellation boundary text files
//!
//! Reads the IAU constellations page, collects every "TXT" boundary file
//! link and downloads the files into the output directory.
//!
//! Usage:
//!   get_boundaries [--output-dir DIR] [--keep-going] [--list]

use std::path::PathBuf;

use anyhow::Context;
use boundaries::{BoundaryFetcher, FailurePolicy, LinkPattern, DEFAULT_PAGE_URL};
use clap::Parser;
use url::Url;

#[derive(Parser, Debug)]
#[command(
    name = "get_boundaries",
    about = "Downloads constellation boundary files linked from the IAU constellations page",
    long_about = None
)]
struct Args {
    /// Page listing the boundary files
    #[arg(long, default_value = DEFAULT_PAGE_URL)]
    url: Url,

    /// Directory the files are saved into
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Required start of a link's href
    #[arg(long, default_value = boundaries::links::DEFAULT_HREF_PREFIX)]
    href_prefix: String,

    /// Required link text
    #[arg(long, default_value = boundaries::links::DEFAULT_LINK_TEXT)]
    link_text: String,

    /// Continue past failed downloads and report them at the end
    #[arg(long)]
    keep_going: bool,

    /// Only print the links, do not download
    #[arg(long)]
    list: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let fetcher = BoundaryFetcher::new(LinkPattern {
        href_prefix: args.href_prefix.clone(),
        link_text: args.link_text.clone(),
    });

    let urls = fetcher
        .find_links(&args.url)
        .with_context(|| format!("Failed to read links from {}", args.url))?;

    for url in &urls {
        println!("{url}");
    }
    if args.list {
        println!("{} files", urls.len());
        return Ok(());
    }

    std::fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("Failed to create {}", args.output_dir.display()))?;

    let policy = if args.keep_going {
        FailurePolicy::KeepGoing
    } else {
        FailurePolicy::Abort
    };
    let report = fetcher.download_all(&urls, &args.output_dir, policy)?;

    for (url, e) in &report.failed {
        eprintln!("Failed: {url}: {e}");
    }
    println!("{} files", report.saved.len());

    report.into_result()?;
    Ok(())
}
