//! Non-interactive subcommands.

use std::{
    fs,
    io::{self, Read, Write},
    path::Path,
};

use crate::{
    error::{Error, Result},
    gate,
    library::{catalog, KeyValueStorage, Proof, ProofDraft, ProofPatch, ProofStore},
    markup::{self, UnicodeTypesetter},
};

/// Field values shared by `add` and `edit`.
#[derive(Debug, Default)]
pub struct FieldArgs<'a> {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub author: Option<String>,
    pub tags: Option<String>,
    pub content_file: Option<&'a Path>,
}

pub fn list<S: KeyValueStorage>(
    store: &mut ProofStore<S>,
    out: &mut impl Write,
    search: &str,
    tag: Option<&str>,
    json: bool,
) -> Result<()> {
    let proofs = store.list()?;
    let shown = catalog::filter(&proofs, search, tag);

    if json {
        serde_json::to_writer_pretty(&mut *out, &shown)?;
        writeln!(out)?;
        return Ok(());
    }

    for proof in &shown {
        writeln!(out, "{}  {}", proof.id, proof.title)?;
        writeln!(out, "    {}", byline(proof))?;
    }
    if !search.trim().is_empty() || tag.is_some() {
        writeln!(out, "{}", catalog::summary(shown.len(), proofs.len(), tag))?;
    } else if shown.is_empty() {
        writeln!(out, "The library is empty.")?;
    }
    Ok(())
}

pub fn tags<S: KeyValueStorage>(store: &mut ProofStore<S>, out: &mut impl Write) -> Result<()> {
    for tag in catalog::all_tags(&store.list()?) {
        writeln!(out, "{tag}")?;
    }
    Ok(())
}

pub fn show<S: KeyValueStorage>(
    store: &mut ProofStore<S>,
    out: &mut impl Write,
    id: &str,
    raw: bool,
) -> Result<()> {
    let proof = store
        .get_by_id(id)?
        .ok_or_else(|| Error::NotFound(id.to_string()))?;

    writeln!(out, "{}", proof.title)?;
    writeln!(out, "{}", byline(&proof))?;
    if !proof.summary.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", proof.summary)?;
    }
    writeln!(out)?;

    if raw {
        writeln!(out, "{}", proof.content.trim())?;
    } else {
        let rendered = markup::render_plain(&markup::render(&proof.content), &UnicodeTypesetter)?;
        writeln!(out, "{}", rendered.trim())?;
    }
    Ok(())
}

/// Render markup read from `input` (a file, or stdin when `None`).
pub fn render(input: Option<&Path>, out: &mut impl Write, html: bool) -> Result<()> {
    let content = read_input(input)?;
    if html {
        writeln!(out, "{}", markup::render_html(&content))?;
    } else {
        let rendered = markup::render_plain(&markup::render(&content), &UnicodeTypesetter)?;
        write!(out, "{rendered}")?;
        if !rendered.ends_with('\n') {
            writeln!(out)?;
        }
    }
    Ok(())
}

pub fn add<S: KeyValueStorage>(
    store: &mut ProofStore<S>,
    out: &mut impl Write,
    passphrase: &str,
    fields: FieldArgs<'_>,
) -> Result<()> {
    gate::check(passphrase)?;

    let content = fields.content_file.map(|p| read_input(Some(p))).transpose()?;
    let draft = ProofDraft {
        title: fields.title.unwrap_or_default(),
        summary: fields.summary.unwrap_or_default(),
        content: content.unwrap_or_default(),
        author: fields.author,
        tags: fields.tags.as_deref().map(catalog::parse_tags).unwrap_or_default(),
    };
    let proof = store.add(draft)?;
    writeln!(out, "{}", proof.id)?;
    Ok(())
}

pub fn edit<S: KeyValueStorage>(
    store: &mut ProofStore<S>,
    out: &mut impl Write,
    id: &str,
    passphrase: &str,
    fields: FieldArgs<'_>,
) -> Result<()> {
    gate::check(passphrase)?;

    let content = fields.content_file.map(|p| read_input(Some(p))).transpose()?;
    let patch = ProofPatch {
        title: fields.title,
        summary: fields.summary,
        content,
        author: fields.author.map(|author| {
            ProofDraft {
                author: Some(author),
                ..ProofDraft::default()
            }
            .author_or_default()
        }),
        tags: fields.tags.as_deref().map(catalog::parse_tags),
    };
    if patch.is_empty() {
        return Err(Error::Invalid("nothing to update".to_string()));
    }

    let proof = store
        .update(id, patch)?
        .ok_or_else(|| Error::NotFound(id.to_string()))?;
    writeln!(out, "Updated {}", proof.id)?;
    Ok(())
}

pub fn delete<S: KeyValueStorage>(
    store: &mut ProofStore<S>,
    out: &mut impl Write,
    id: &str,
    passphrase: &str,
) -> Result<()> {
    gate::check(passphrase)?;

    if !store.delete(id)? {
        return Err(Error::NotFound(id.to_string()));
    }
    writeln!(out, "Deleted {id}")?;
    Ok(())
}

fn byline(proof: &Proof) -> String {
    let mut line = format!("{} \u{2022} {}", proof.author, proof.created_date());
    if !proof.tags.is_empty() {
        line.push_str(&format!(" \u{2022} [{}]", proof.tags.join(", ")));
    }
    line
}

/// Read a file, or stdin for `None` and `-`.
fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p != Path::new("-") => Ok(fs::read_to_string(p)?),
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::MemoryStorage;

    fn run(f: impl FnOnce(&mut ProofStore<MemoryStorage>, &mut Vec<u8>) -> Result<()>) -> (ProofStore<MemoryStorage>, String) {
        let mut store = ProofStore::new(MemoryStorage::new());
        let mut out = Vec::new();
        f(&mut store, &mut out).unwrap();
        (store, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_list_shows_summary_only_when_filtering() {
        let (_, all) = run(|s, out| list(s, out, "", None, false));
        assert!(all.contains("1  The Infinity of Primes"));
        assert!(!all.contains("Showing"));

        let (_, filtered) = run(|s, out| list(s, out, "", Some("Analysis"), false));
        assert!(filtered.contains("Euler's Identity"));
        assert!(filtered.contains("Showing 1 of 2 proofs in Analysis"));
    }

    #[test]
    fn test_show_typesets_content() {
        let (_, shown) = run(|s, out| show(s, out, "2", false));
        assert!(shown.starts_with("Euler's Identity\nLeonhard Euler"));
        assert!(shown.contains("\u{258c} Derivation"));
        assert!(shown.contains("cos(π) = -1"));
    }

    #[test]
    fn test_show_unknown_id() {
        let mut store = ProofStore::new(MemoryStorage::new());
        let err = show(&mut store, &mut Vec::new(), "zzz", false).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_mutations_require_passphrase() {
        let mut store = ProofStore::new(MemoryStorage::new());
        let err = delete(&mut store, &mut Vec::new(), "1", "guess").unwrap_err();
        assert!(matches!(err, Error::AccessDenied));
        assert_eq!(store.list().unwrap().len(), 2);
    }

    #[test]
    fn test_edit_blank_author_becomes_anonymous() {
        let (mut store, out) = run(|s, out| {
            edit(
                s,
                out,
                "1",
                gate::OWNER_PASSPHRASE,
                FieldArgs {
                    author: Some(" ".into()),
                    tags: Some("Primes, Classics".into()),
                    ..FieldArgs::default()
                },
            )
        });
        assert_eq!(out, "Updated 1\n");
        let proof = store.get_by_id("1").unwrap().unwrap();
        assert_eq!(proof.author, "Anonymous");
        assert_eq!(proof.tags, vec!["Primes", "Classics"]);
        assert_eq!(proof.title, "The Infinity of Primes");
    }

    #[test]
    fn test_edit_without_fields_is_rejected() {
        let mut store = ProofStore::new(MemoryStorage::new());
        let err = edit(&mut store, &mut Vec::new(), "1", gate::OWNER_PASSPHRASE, FieldArgs::default())
            .unwrap_err();
        assert!(matches!(err, Error::Invalid(_)));
    }
}
