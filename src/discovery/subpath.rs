//! Deployment subpath extraction from CI workflow text
//!
//! Line-oriented scan, no YAML parsing. Lines mentioning `target-folder` or
//! `deploy` are inspected and the value following `target-folder:` is collected.
//!
//! ```text
//! - name: Deploy Python docs for latest development version
//!   uses: JamesIves/github-pages-deploy-action@v4
//!   with:
//!     folder: py-polars/docs/build/html
//!     target-folder: api/python/dev          <- collected
//! ```

use regex::Regex;
use tracing::{debug, trace};

use crate::config::SubpathPolicy;

const TARGET_FOLDER_TOKEN: &str = "target-folder";
const DEPLOY_TOKEN: &str = "deploy";
const DEV_TOKEN: &str = "dev";
const STABLE_TOKEN: &str = "stable";
const TEMPLATE_TOKEN: &str = "${{";

/// Collects deployment subpaths from workflow text
pub struct SubpathParser {
    /// Regex for `target-folder: <value> [# comment]`
    target_folder_re: Regex,
}

impl SubpathParser {
    pub fn new() -> Self {
        Self {
            target_folder_re: Regex::new(r#"target-folder:\s*(?:"([^"]*)"|'([^']*)'|([^#]*))"#)
                .unwrap(),
        }
    }
}

impl Default for SubpathParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SubpathParser {
    /// All subpaths in file order, duplicates kept
    pub fn parse(&self, content: &str) -> Vec<String> {
        let mut subpaths = Vec::new();

        for (line_num, line) in content.lines().enumerate() {
            if !line.contains(TARGET_FOLDER_TOKEN) && !line.contains(DEPLOY_TOKEN) {
                continue;
            }

            let Some(caps) = self.target_folder_re.captures(line) else {
                trace!("Deploy line {} without target-folder: {}", line_num + 1, line.trim());
                continue;
            };

            let value = caps
                .get(1)
                .or_else(|| caps.get(2))
                .or_else(|| caps.get(3))
                .map(|m| m.as_str().trim().trim_matches('/'))
                .unwrap_or_default();

            if value.is_empty() {
                continue;
            }

            debug!("Found target-folder {:?} on line {}", value, line_num + 1);
            subpaths.push(value.to_string());
        }

        subpaths
    }
}

/// Whether a subpath can be the stable deployment: not `dev`, not templated
pub fn is_stable_candidate(subpath: &str) -> bool {
    !subpath.contains(DEV_TOKEN) && !subpath.contains(TEMPLATE_TOKEN)
}

/// Picks the stable deployment subpath according to `policy`
pub fn select_stable(subpaths: &[String], policy: SubpathPolicy) -> Option<&str> {
    let qualifying = subpaths
        .iter()
        .map(String::as_str)
        .filter(|s| is_stable_candidate(s));

    let selected = match policy {
        SubpathPolicy::LastQualifying => qualifying.last(),
        SubpathPolicy::StableToken => {
            let qualifying: Vec<&str> = qualifying.collect();
            qualifying
                .iter()
                .copied()
                .find(|s| s.contains(STABLE_TOKEN))
                .or_else(|| qualifying.last().copied())
        }
    };

    debug!("Selected stable subpath {:?} ({:?})", selected, policy);
    selected
}
