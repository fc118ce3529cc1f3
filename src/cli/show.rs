//! Show command implementation.
//!
//! Prints the parsed metadata of a document as JSON on stdout.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use serde_json::Value;

use crate::discovery::DOCUMENT_FILENAME;
use crate::error::{Result, XlsError};
use crate::parser::{load_document, ParsedDocument, Section, XlsDocument};

/// Print the parsed metadata of one document as JSON
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Document or XLS-* folder
    pub file: PathBuf,

    /// Include the section headings
    #[arg(long)]
    pub sections: bool,
}

#[derive(Serialize)]
struct ShowOutput<'a> {
    #[serde(flatten)]
    metadata: &'a XlsDocument,
    #[serde(skip_serializing_if = "Option::is_none")]
    sections: Option<&'a [Section]>,
}

pub fn run(args: ShowArgs) -> Result<()> {
    let path = if args.file.is_dir() {
        args.file.join(DOCUMENT_FILENAME)
    } else {
        args.file.clone()
    };

    let doc = load_document(&path)?;
    let json = to_json(&doc.parsed, args.sections)?;
    let pretty = serde_json::to_string_pretty(&json).map_err(|e| XlsError::Parse {
        message: format!("Failed to serialize {}: {}", path.display(), e),
        help: None,
    })?;
    println!("{}", pretty);
    Ok(())
}

/// JSON form of a parsed document.
pub fn to_json(doc: &ParsedDocument, with_sections: bool) -> Result<Value> {
    let output = ShowOutput {
        metadata: &doc.metadata,
        sections: with_sections.then_some(doc.sections.as_slice()),
    };
    serde_json::to_value(&output).map_err(|e| XlsError::Parse {
        message: format!("Failed to serialize document: {}", e),
        help: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_document;

    const SOURCE: &str = "\
<pre>
  title: Credentials
  author: Jane Doe <jane@example.com>
  category: Amendment
  status: Final
</pre>

## 1. Abstract
### 1.1. Terms _(Optional)_
";

    #[test]
    fn test_metadata_fields() {
        let doc = parse_document(SOURCE, "XLS-0070d-credentials").unwrap();
        let json = to_json(&doc, false).unwrap();

        assert_eq!(json["number"], 70);
        assert_eq!(json["title"], "Credentials");
        assert_eq!(json["category"], "Amendment");
        assert_eq!(json["status"], "Final");
        assert_eq!(json["authors"][0]["link"], "mailto:jane@example.com");
        assert!(json.get("sections").is_none());
    }

    #[test]
    fn test_metadata_snapshot() {
        let doc = parse_document(SOURCE, "XLS-0070d-credentials").unwrap();

        insta::assert_json_snapshot!(doc.metadata, @r###"
        {
          "number": 70,
          "title": "Credentials",
          "description": "No description available",
          "authors": [
            {
              "name": "Jane Doe",
              "link": "mailto:jane@example.com"
            }
          ],
          "folder": "XLS-0070d-credentials",
          "category": "Amendment",
          "status": "Final",
          "created": "Unknown",
          "updated": null,
          "proposal_from": null,
          "implementation": null,
          "requires": null,
          "withdrawal_reason": null
        }
        "###);
    }

    #[test]
    fn test_sections_included_on_request() {
        let doc = parse_document(SOURCE, "XLS-0070d-credentials").unwrap();
        let json = to_json(&doc, true).unwrap();

        assert_eq!(json["sections"][0]["title"], "Abstract");
        assert_eq!(json["sections"][1]["number"], "1.1");
        assert_eq!(json["sections"][1]["optional"], true);
    }
}
