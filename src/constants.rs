// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role.

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// How many objects the Notion API returns per page of results (API maximum).
pub const NOTION_API_PAGE_SIZE: usize = 100;

/// Notion API version sent with every request.
pub const NOTION_API_VERSION: &str = "2022-06-28";

/// Base URL of the Notion REST API.
pub const NOTION_API_BASE_URL: &str = "https://api.notion.com/v1";

// ---------------------------------------------------------------------------
// Traversal defaults
// ---------------------------------------------------------------------------

/// Default depth ceiling for block-tree traversal.
pub const DEFAULT_MAX_FETCH_DEPTH: usize = 10;

/// Default pause before each nested children request, in milliseconds.
pub const DEFAULT_INTER_REQUEST_DELAY_MS: u64 = 200;

// ---------------------------------------------------------------------------
// Formatting boundaries
// ---------------------------------------------------------------------------

/// Number of spaces per indentation level in rendered Markdown.
pub const INDENT_SPACES: usize = 2;

/// Estimated characters per block, used to pre-allocate output strings.
pub const CHARS_PER_BLOCK_ESTIMATE: usize = 256;

// ---------------------------------------------------------------------------
// Artifact naming
// ---------------------------------------------------------------------------

/// Maximum length of the slug part of an artifact filename.
pub const FILENAME_SLUG_MAX_CHARS: usize = 50;

/// How many id characters stand in for an unusable title.
pub const ID_PREFIX_CHARS: usize = 8;

/// Property names checked first, in order, when looking for a page title.
pub const PREFERRED_TITLE_PROPERTIES: [&str; 5] = ["title", "Title", "Name", "name", "Título"];

/// Filename of the index artifact.
pub const INDEX_FILENAME: &str = "index.md";

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;

// ---------------------------------------------------------------------------
// Batch export
// ---------------------------------------------------------------------------

/// Directory the exporter writes into unless told otherwise.
pub const DEFAULT_OUTPUT_DIR: &str = "output/markdown";
