//! Library export decoding.
//!
//! iTunes-style library exports are XML property lists: a `Tracks`
//! dictionary mapping track IDs to loosely-typed track records, and a
//! `Playlists` array whose entries list `Playlist Items` in play order. This
//! module decodes that shape into the strongly-typed [`Library`] model,
//! independent of how the keys happen to be ordered in the document.
//!
//! Records missing a `Track ID` are dropped; playlist items referencing an
//! unknown ID survive here and are skipped later by the assembler.

use std::collections::HashMap;
use std::path::Path;

use plist::{Dictionary, Value};

use crate::model::{Library, SourceTrack};

/// Errors from reading or decoding a library export.
#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    #[error("Library file not found: {0}")]
    NotFound(String),

    #[error("Failed to parse library file: {0}")]
    Parse(String),

    #[error("Library file is malformed: {0}")]
    Malformed(String),
}

/// Parse a library export file into playlist order plus track metadata.
///
/// The playlist name is taken from the file stem. When the export contains
/// several playlists, the first one defines the order; the original tool
/// behaved the same way.
pub fn parse_library(path: &Path) -> Result<Library, LibraryError> {
    if !path.exists() {
        return Err(LibraryError::NotFound(path.display().to_string()));
    }

    let value = Value::from_file(path).map_err(|e| LibraryError::Parse(e.to_string()))?;
    let root = value
        .as_dictionary()
        .ok_or_else(|| LibraryError::Malformed("root is not a dictionary".to_string()))?;

    let tracks = decode_tracks(root)?;
    let order = decode_playlist_order(root);

    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("playlist")
        .to_string();

    tracing::info!(
        tracks = tracks.len(),
        entries = order.len(),
        playlist = %name,
        "parsed library export"
    );

    Ok(Library {
        name,
        order,
        tracks,
    })
}

/// Decode the `Tracks` dictionary into a track map.
fn decode_tracks(root: &Dictionary) -> Result<HashMap<u64, SourceTrack>, LibraryError> {
    let tracks_dict = root
        .get("Tracks")
        .and_then(Value::as_dictionary)
        .ok_or_else(|| LibraryError::Malformed("missing Tracks dictionary".to_string()))?;

    let mut tracks = HashMap::new();
    for (_key, value) in tracks_dict {
        let Some(record) = value.as_dictionary() else {
            continue;
        };
        if let Some(track) = decode_track(record) {
            tracks.insert(track.id, track);
        }
    }

    Ok(tracks)
}

/// Decode one loosely-typed track record into a [`SourceTrack`].
///
/// Returns `None` when the record has no `Track ID`; every other field is
/// optional and defaults to empty/absent.
fn decode_track(record: &Dictionary) -> Option<SourceTrack> {
    let id = get_integer(record, "Track ID")?;

    Some(SourceTrack {
        id,
        name: get_string(record, "Name"),
        artist: get_string(record, "Artist"),
        album: get_string(record, "Album"),
        track_number: get_integer(record, "Track Number").map(|n| n as u32),
    })
}

/// Decode the first playlist's `Playlist Items` into an ordered ID list.
///
/// Exports without a playlist section yield an empty order rather than an
/// error: the file may legitimately be a bare track dump.
fn decode_playlist_order(root: &Dictionary) -> Vec<u64> {
    let Some(playlists) = root.get("Playlists").and_then(Value::as_array) else {
        return Vec::new();
    };

    let Some(playlist) = playlists.first().and_then(Value::as_dictionary) else {
        return Vec::new();
    };

    let Some(items) = playlist.get("Playlist Items").and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(Value::as_dictionary)
        .filter_map(|item| get_integer(item, "Track ID"))
        .collect()
}

fn get_string(record: &Dictionary, key: &str) -> String {
    record
        .get(key)
        .and_then(Value::as_string)
        .unwrap_or_default()
        .to_string()
}

fn get_integer(record: &Dictionary, key: &str) -> Option<u64> {
    record.get(key).and_then(Value::as_unsigned_integer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE_EXPORT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>Major Version</key><integer>1</integer>
    <key>Tracks</key>
    <dict>
        <key>101</key>
        <dict>
            <key>Track ID</key><integer>101</integer>
            <key>Name</key><string>Yesterday</string>
            <key>Artist</key><string>The Beatles</string>
            <key>Album</key><string>Help!</string>
            <key>Track Number</key><integer>13</integer>
        </dict>
        <key>102</key>
        <dict>
            <key>Track ID</key><integer>102</integer>
            <key>Name</key><string>Untitled</string>
        </dict>
        <key>103</key>
        <dict>
            <key>Name</key><string>No ID At All</string>
        </dict>
    </dict>
    <key>Playlists</key>
    <array>
        <dict>
            <key>Name</key><string>My Mix</string>
            <key>Playlist Items</key>
            <array>
                <dict><key>Track ID</key><integer>101</integer></dict>
                <dict><key>Track ID</key><integer>102</integer></dict>
                <dict><key>Track ID</key><integer>101</integer></dict>
                <dict><key>Other Key</key><string>ignored</string></dict>
            </array>
        </dict>
    </array>
</dict>
</plist>
"#;

    fn write_export(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".xml")
            .tempfile()
            .expect("create temp file");
        file.write_all(contents.as_bytes()).expect("write temp file");
        file
    }

    #[test]
    fn test_parse_sample_export() {
        let file = write_export(SAMPLE_EXPORT);
        let library = parse_library(file.path()).unwrap();

        assert_eq!(library.order, vec![101, 102, 101]);
        assert_eq!(library.tracks.len(), 2);

        let yesterday = &library.tracks[&101];
        assert_eq!(yesterday.name, "Yesterday");
        assert_eq!(yesterday.artist, "The Beatles");
        assert_eq!(yesterday.album, "Help!");
        assert_eq!(yesterday.track_number, Some(13));
    }

    #[test]
    fn test_partial_track_defaults_to_empty_fields() {
        let file = write_export(SAMPLE_EXPORT);
        let library = parse_library(file.path()).unwrap();

        let partial = &library.tracks[&102];
        assert_eq!(partial.name, "Untitled");
        assert_eq!(partial.artist, "");
        assert_eq!(partial.album, "");
        assert_eq!(partial.track_number, None);
        assert!(!partial.is_resolvable());
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let result = parse_library(Path::new("/no/such/library.xml"));
        assert!(matches!(result, Err(LibraryError::NotFound(_))));
    }

    #[test]
    fn test_invalid_xml_is_parse_error() {
        let file = write_export("this is not a plist");
        let result = parse_library(file.path());
        assert!(matches!(result, Err(LibraryError::Parse(_))));
    }

    #[test]
    fn test_missing_tracks_section_is_malformed() {
        let file = write_export(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>Major Version</key><integer>1</integer>
</dict>
</plist>
"#,
        );
        let result = parse_library(file.path());
        assert!(matches!(result, Err(LibraryError::Malformed(_))));
    }

    #[test]
    fn test_export_without_playlists_has_empty_order() {
        let file = write_export(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>Tracks</key>
    <dict>
        <key>1</key>
        <dict>
            <key>Track ID</key><integer>1</integer>
            <key>Name</key><string>Solo</string>
        </dict>
    </dict>
</dict>
</plist>
"#,
        );
        let library = parse_library(file.path()).unwrap();
        assert!(library.order.is_empty());
        assert_eq!(library.tracks.len(), 1);
    }
}
