use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use csv::{ByteRecord, ErrorKind, ReaderBuilder, StringRecord};

use crate::{
    error::{AppError, AppResult},
    models::{Movie, MovieRecord},
    services::tags::build_tag,
};

/// Column positions for the fields the store reads
#[derive(Debug, Default)]
struct Columns {
    title: Option<usize>,
    imdb_id: Option<usize>,
    release_year: Option<usize>,
    genre: Option<usize>,
    actors: Option<usize>,
    directors: Option<usize>,
    writers: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Self {
        let mut columns = Columns::default();
        for (i, header) in headers.iter().enumerate() {
            let slot = match header.trim().to_lowercase().replace('_', "").as_str() {
                "title" => &mut columns.title,
                "imdbid" => &mut columns.imdb_id,
                "releaseyear" => &mut columns.release_year,
                "genre" => &mut columns.genre,
                "actors" => &mut columns.actors,
                "directors" => &mut columns.directors,
                "writers" => &mut columns.writers,
                _ => continue,
            };
            // first occurrence wins
            if slot.is_none() {
                *slot = Some(i);
            }
        }
        columns
    }

    /// Reads the known columns, blanking cells that are not valid UTF-8
    fn read(&self, record: &ByteRecord) -> MovieRecord {
        let cell = |col: Option<usize>| {
            col.and_then(|i| record.get(i)).map(|bytes| match std::str::from_utf8(bytes) {
                Ok(value) => value.to_string(),
                Err(e) => {
                    tracing::warn!(
                        column = col.unwrap_or_default(),
                        error = %e,
                        "Blanking undecodable corpus cell"
                    );
                    String::new()
                }
            })
        };
        MovieRecord {
            title: cell(self.title),
            imdb_id: cell(self.imdb_id),
            release_year: cell(self.release_year),
            genre: cell(self.genre),
            actors: cell(self.actors),
            directors: cell(self.directors),
            writers: cell(self.writers),
        }
    }
}

/// In-memory table of cleaned movies, one row per item
///
/// Row ids are dense and follow source order after malformed rows are dropped.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    movies: Vec<Movie>,
    /// Lowercased title → first row with that title
    by_title: HashMap<String, usize>,
}

impl RecordStore {
    /// Builds the store from raw records, dropping any without a title
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = MovieRecord>,
    {
        let mut movies = Vec::new();
        let mut by_title = HashMap::new();
        let mut dropped = 0usize;

        for record in records {
            let Some(title) = record.title() else {
                dropped += 1;
                continue;
            };

            let id = movies.len();
            by_title.entry(title.to_lowercase()).or_insert(id);
            movies.push(Movie {
                id,
                title: title.to_string(),
                tag: build_tag(
                    record.genre.as_deref(),
                    record.actors.as_deref(),
                    record.directors.as_deref(),
                    record.writers.as_deref(),
                ),
                imdb_id: record.imdb_id(),
                release_year: record.release_year(),
            });
        }

        if dropped > 0 {
            tracing::warn!(dropped, "Dropped corpus rows without a title");
        }

        Self { movies, by_title }
    }

    /// Parses a comma-delimited corpus with a header row
    ///
    /// Short rows are padded with empty cells and cells that are not valid
    /// UTF-8 read as empty. Rows the reader cannot split are skipped. A header
    /// without a `title` column, or an I/O error part way through, fails the
    /// load.
    pub fn from_reader<R: Read>(reader: R) -> AppResult<Self> {
        let mut reader = ReaderBuilder::new().flexible(true).from_reader(reader);
        let columns = Columns::from_headers(reader.headers()?);

        if columns.title.is_none() {
            return Err(AppError::Build(
                "corpus header has no title column".to_string(),
            ));
        }

        let mut records = Vec::new();
        for (line, result) in reader.byte_records().enumerate() {
            match result {
                Ok(record) => records.push(columns.read(&record)),
                Err(e) if matches!(e.kind(), ErrorKind::Io(_)) => {
                    return Err(AppError::Build(format!(
                        "corpus read failed at row {}: {}",
                        line + 1,
                        e
                    )));
                }
                Err(e) => {
                    tracing::warn!(row = line + 1, error = %e, "Skipping unreadable corpus row");
                }
            }
        }

        Ok(Self::from_records(records))
    }

    /// Opens and parses the corpus file at `path`
    pub fn from_path<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| {
            AppError::Build(format!("cannot open corpus {}: {}", path.display(), e))
        })?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn get(&self, id: usize) -> Option<&Movie> {
        self.movies.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Movie> {
        self.movies.iter()
    }

    /// Finds the first movie whose title matches case-insensitively
    pub fn find_by_title(&self, title: &str) -> Option<&Movie> {
        self.by_title
            .get(&title.to_lowercase())
            .and_then(|&id| self.movies.get(id))
    }

    /// Tags in row order, the vectorizer's input
    pub fn tags(&self) -> Vec<&str> {
        self.movies.iter().map(|m| m.tag.as_str()).collect()
    }
}
