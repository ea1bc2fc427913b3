//! Table definitions inside an xlsx package.
//!
//! calamine reads cell values but does not expose a table's raw reference, so
//! table parts are located by walking the package relationships:
//! `xl/workbook.xml` -> worksheet part -> worksheet `_rels` -> `xl/tables/*.xml`.

use std::collections::HashMap;
use std::io::{BufReader, Read, Seek};

use log::{debug, warn};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use zip::read::ZipFile;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::error::{ExtractError, Result};

const WORKBOOK_PART: &str = "xl/workbook.xml";
const WORKBOOK_RELS_PART: &str = "xl/_rels/workbook.xml.rels";

const TAG_SHEET: &[u8] = b"sheet";
const TAG_RELATIONSHIP: &[u8] = b"Relationship";
const TAG_TABLE: &[u8] = b"table";

const REL_WORKSHEET: &str = "/worksheet";
const REL_TABLE: &str = "/table";

/// A table as declared by its package part.
///
/// `name` is the part's `name` attribute (falling back to `displayName`).
/// `display_name` is set only when the part declares a different `displayName`;
/// the loader registers the table under both.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct TablePart {
    pub(crate) name: String,
    pub(crate) display_name: Option<String>,
    pub(crate) reference: String,
}

/// Reads every table part, grouped by the name of the sheet that owns it.
pub(crate) fn load_table_parts<RS: Read + Seek>(
    reader: RS,
) -> Result<HashMap<String, Vec<TablePart>>> {
    let mut zip = ZipArchive::new(reader)?;

    let workbook_rels = load_relationships(&mut zip, WORKBOOK_RELS_PART, REL_WORKSHEET)?
        .ok_or_else(|| ExtractError::Package(format!("missing part {WORKBOOK_RELS_PART}")))?;
    let sheets = load_sheet_paths(&mut zip, &workbook_rels)?;

    let mut tables = HashMap::with_capacity(sheets.len());
    for (sheet_name, sheet_path) in sheets {
        let Some(table_rels) = load_relationships(&mut zip, &rels_part_for(&sheet_path), REL_TABLE)?
        else {
            continue;
        };

        let mut parts = Vec::with_capacity(table_rels.len());
        for (_, target) in table_rels {
            let table_path = resolve_target(&sheet_path, &target);
            match load_table_part(&mut zip, &table_path)? {
                Some(part) => {
                    debug!("found table '{}' ({}) on sheet '{}'", part.name, part.reference, sheet_name);
                    parts.push(part);
                }
                None => warn!("skipping table part {table_path}: missing or without name/ref"),
            }
        }

        if !parts.is_empty() {
            tables.insert(sheet_name, parts);
        }
    }

    Ok(tables)
}

/// Finds a part by name, ignoring ASCII case and path separator style.
fn part_file<'a, RS: Read + Seek>(
    zip: &'a mut ZipArchive<RS>,
    name: &str,
) -> Result<Option<ZipFile<'a, RS>>> {
    let pattern = name.replace('\\', "/");
    let path = zip
        .file_names()
        .find(|file_name| pattern.eq_ignore_ascii_case(file_name))
        .map(|file_name| file_name.to_owned());

    match path.map(|file_name| zip.by_name(&file_name)).transpose() {
        Ok(file) => Ok(file),
        Err(ZipError::FileNotFound) => Ok(None),
        Err(error) => Err(error.into()),
    }
}

fn xml_reader<'a, RS: Read + Seek>(
    zip: &'a mut ZipArchive<RS>,
    name: &str,
) -> Result<Option<Reader<BufReader<ZipFile<'a, RS>>>>> {
    Ok(part_file(zip, name)?.map(|file| {
        let mut reader = Reader::from_reader(BufReader::new(file));
        let config = reader.config_mut();
        config.check_end_names = false;
        config.expand_empty_elements = true;
        reader
    }))
}

/// Value of the attribute whose local name (namespace prefix ignored) is `key`.
fn attribute(event: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>> {
    for attribute in event.attributes() {
        let attribute = attribute?;
        if attribute.key.local_name().as_ref() == key {
            return Ok(Some(attribute.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

/// Relationship `(id, target)` pairs of the given type suffix, in document order.
/// `None` when the relationships part does not exist.
fn load_relationships<RS: Read + Seek>(
    zip: &mut ZipArchive<RS>,
    path: &str,
    kind_suffix: &str,
) -> Result<Option<Vec<(String, String)>>> {
    let Some(mut reader) = xml_reader(zip, path)? else {
        return Ok(None);
    };

    let mut relationships = Vec::new();
    let mut buffer = Vec::with_capacity(1024);
    loop {
        buffer.clear();
        match reader.read_event_into(&mut buffer)? {
            Event::Start(event) if event.local_name().as_ref() == TAG_RELATIONSHIP => {
                let kind = attribute(&event, b"Type")?;
                if !kind.is_some_and(|kind| kind.ends_with(kind_suffix)) {
                    continue;
                }
                let id = attribute(&event, b"Id")?;
                let target = attribute(&event, b"Target")?;
                if let Some((id, target)) = id.zip(target) {
                    relationships.push((id, target));
                }
            }
            Event::Eof => break,
            _ => (),
        }
    }

    Ok(Some(relationships))
}

/// `(sheet name, worksheet part path)` in workbook order.
fn load_sheet_paths<RS: Read + Seek>(
    zip: &mut ZipArchive<RS>,
    relationships: &[(String, String)],
) -> Result<Vec<(String, String)>> {
    let mut reader = xml_reader(zip, WORKBOOK_PART)?
        .ok_or_else(|| ExtractError::Package(format!("missing part {WORKBOOK_PART}")))?;

    let mut sheets = Vec::new();
    let mut buffer = Vec::with_capacity(1024);
    loop {
        buffer.clear();
        match reader.read_event_into(&mut buffer)? {
            Event::Start(event) if event.local_name().as_ref() == TAG_SHEET => {
                let name = attribute(&event, b"name")?;
                let id = attribute(&event, b"id")?;
                if let Some((name, id)) = name.zip(id) {
                    if let Some((_, target)) = relationships.iter().find(|(rel_id, _)| *rel_id == id) {
                        sheets.push((name, resolve_target(WORKBOOK_PART, target)));
                    }
                }
            }
            Event::Eof => break,
            _ => (),
        }
    }

    Ok(sheets)
}

fn load_table_part<RS: Read + Seek>(
    zip: &mut ZipArchive<RS>,
    path: &str,
) -> Result<Option<TablePart>> {
    let Some(mut reader) = xml_reader(zip, path)? else {
        return Ok(None);
    };

    let mut buffer = Vec::with_capacity(1024);
    loop {
        buffer.clear();
        match reader.read_event_into(&mut buffer)? {
            Event::Start(event) if event.local_name().as_ref() == TAG_TABLE => {
                let name = attribute(&event, b"name")?;
                let display_name = attribute(&event, b"displayName")?;
                let reference = attribute(&event, b"ref")?;

                let (name, display_name) = match (name, display_name) {
                    (Some(name), Some(display)) if display != name => (Some(name), Some(display)),
                    (Some(name), _) => (Some(name), None),
                    (None, display) => (display, None),
                };
                return Ok(name.zip(reference).map(|(name, reference)| TablePart {
                    name,
                    display_name,
                    reference,
                }));
            }
            Event::Eof => return Ok(None),
            _ => (),
        }
    }
}

/// `xl/worksheets/sheet1.xml` -> `xl/worksheets/_rels/sheet1.xml.rels`
fn rels_part_for(part: &str) -> String {
    match part.rsplit_once('/') {
        Some((dir, file)) => format!("{dir}/_rels/{file}.rels"),
        None => format!("_rels/{part}.rels"),
    }
}

/// Resolves a relationship target against the part that declares it.
fn resolve_target(source_part: &str, target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute.to_string();
    }

    let mut segments: Vec<&str> = source_part.split('/').collect();
    segments.pop();

    for segment in target.split('/') {
        match segment {
            "" | "." => (),
            ".." => {
                segments.pop();
            }
            _ => segments.push(segment),
        }
    }

    segments.join("/")
}
