use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::Utc;
use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use rayon::prelude::*;
use regex::Regex;
use tracing::{debug, error, info, warn};

use crate::cli::ParseArgs;
use crate::model::{
    ActMetadata, ChunkMetadata, ChunkType, LegalChunk, ParseRunCounts, ParseRunManifest,
    ParseRunPaths, ParseStatistics, ParseStatus, ParsingReportEntry,
};
use crate::util::{
    ensure_directory, now_utc_string, percent_decode, sha256_file, utc_compact_string,
    write_json_pretty,
};

mod act_metadata;
mod aggregate;
mod chunk_builder;
mod cross_refs;
mod hierarchy;
mod normalize;
mod parser;
mod quality;
mod run;
mod text_loader;

pub use run::run;
pub(crate) use parser::{LegalParser, ParsedAct};

use act_metadata::*;
use aggregate::*;
use chunk_builder::*;
use cross_refs::*;
use hierarchy::*;
use normalize::*;
use quality::*;
use text_loader::*;
