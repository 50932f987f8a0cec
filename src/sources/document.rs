// src/sources/document.rs
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use roxmltree::{Document, Node};
use zip::ZipArchive;

use crate::sources::{Description, DescriptionSource};
use crate::utils::error::SourceError;

const DOCUMENT_PART: &str = "word/document.xml";
const WORD_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Non-empty body paragraphs of a `.docx` file, one description each.
#[derive(Debug)]
pub struct DocumentSource {
    path: PathBuf,
    paragraphs: Vec<String>,
}

impl DocumentSource {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        tracing::info!("Reading document: {}", path.display());
        let file = File::open(path)?;
        let mut archive = ZipArchive::new(file)?;

        let mut xml = String::new();
        archive.by_name(DOCUMENT_PART)?.read_to_string(&mut xml)?;
        tracing::debug!("Read {} ({} bytes)", DOCUMENT_PART, xml.len());

        let paragraphs = parse_paragraphs(&xml)?;
        tracing::info!("Loaded {} paragraphs from {}", paragraphs.len(), path.display());

        Ok(Self {
            path: path.to_path_buf(),
            paragraphs,
        })
    }
}

impl DescriptionSource for DocumentSource {
    fn label(&self) -> String {
        self.path.display().to_string()
    }

    fn descriptions(&self) -> Box<dyn Iterator<Item = Description> + '_> {
        Box::new(self.paragraphs.iter().cloned().map(Description::Text))
    }
}

/// Top-level body paragraphs, trimmed, with empty ones dropped.
/// Paragraphs nested in tables are not included.
fn parse_paragraphs(xml: &str) -> Result<Vec<String>, roxmltree::Error> {
    let document = Document::parse(xml)?;
    let Some(body) = document
        .root_element()
        .children()
        .find(|node| is_word_element(node, "body"))
    else {
        tracing::warn!("Document has no body element");
        return Ok(Vec::new());
    };

    Ok(body
        .children()
        .filter(|node| is_word_element(node, "p"))
        .map(|paragraph| paragraph_text(paragraph).trim().to_string())
        .filter(|text| !text.is_empty())
        .collect())
}

fn paragraph_text(paragraph: Node) -> String {
    let mut text = String::new();
    push_run_text(paragraph, &mut text);
    text
}

/// Appends the run text under `node`. Text boxes anchored in the paragraph
/// hold their own paragraphs and are left out.
fn push_run_text(node: Node, text: &mut String) {
    for child in node.children().filter(|child| child.is_element()) {
        if is_word_element(&child, "t") {
            text.push_str(child.text().unwrap_or_default());
        } else if is_word_element(&child, "tab") {
            text.push('\t');
        } else if is_word_element(&child, "br") || is_word_element(&child, "cr") {
            text.push('\n');
        } else if !is_word_element(&child, "txbxContent") {
            push_run_text(child, text);
        }
    }
}

fn is_word_element(node: &Node, local_name: &str) -> bool {
    node.is_element()
        && node.tag_name().name() == local_name
        && node.tag_name().namespace() == Some(WORD_NS)
}
