pub mod album;
pub mod export;
pub mod packet;
pub mod page;
pub mod sticker;

use anyhow::Result;
use sticker_core::{Catalog, Platform, Syndication, SyndicationEdit};
use sticker_storage::Storage;

use crate::cli::SyndicationArgs;

pub type AppCatalog = Catalog<Storage>;

/// Turn syndication flags into edits, in a fixed order
pub fn syndication_edits(args: SyndicationArgs) -> Result<Vec<SyndicationEdit>> {
    let mut edits = Vec::new();

    if args.publish_all {
        edits.push(SyndicationEdit::PublishAll(true));
    }
    if args.unpublish_all {
        edits.push(SyndicationEdit::PublishAll(false));
    }
    for platform in args.publish {
        edits.push(SyndicationEdit::Publish {
            platform,
            published: true,
        });
    }
    for platform in args.unpublish {
        edits.push(SyndicationEdit::Publish {
            platform,
            published: false,
        });
    }
    for (platform, date) in args.start {
        edits.push(SyndicationEdit::SetStart {
            platform: parse_platform(&platform)?,
            date: date.0,
        });
    }
    for (platform, date) in args.end {
        edits.push(SyndicationEdit::SetEnd {
            platform: parse_platform(&platform)?,
            date: date.0,
        });
    }
    edits.extend(args.copy_start.into_iter().map(SyndicationEdit::CopyStartToEnd));
    edits.extend(args.clear_end.into_iter().map(SyndicationEdit::ClearEnd));

    Ok(edits)
}

fn parse_platform(s: &str) -> Result<Platform> {
    s.parse::<Platform>().map_err(|e| anyhow::anyhow!(e))
}

pub fn print_syndication(syndication: &Syndication) {
    println!("  Syndication:");
    for entry in syndication.entries() {
        let start = entry
            .start_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        let end = entry
            .end_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "    {:<8} {:<14} start: {}  end: {}",
            entry.platform.as_str(),
            if entry.is_published {
                "published"
            } else {
                "not published"
            },
            start,
            end
        );
    }
}

/// Ask for a y/N confirmation on stdin
pub fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    std::io::Write::flush(&mut std::io::stdout())?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;

    Ok(input.trim().eq_ignore_ascii_case("y"))
}
