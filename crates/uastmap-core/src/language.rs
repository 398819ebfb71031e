//! Language registry
//!
//! Maps a grammar directory name (as found under the grammars root) to the
//! canonical language name written into the map header, plus the file
//! extensions and exact filenames the language claims.

use serde::Serialize;

/// Static description of one supported grammar directory.
///
/// `patterns` mixes extensions and filenames the same way the header does:
/// anything starting with `.` is an extension, everything else is a filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageEntry {
    /// Grammar directory name (e.g., "c_sharp")
    pub dir: &'static str,
    /// Canonical language name (e.g., "csharp")
    pub name: &'static str,
    /// Extensions and filenames, in header order
    pub patterns: &'static [&'static str],
}

impl LanguageEntry {
    pub fn extensions(&self) -> impl Iterator<Item = &'static str> {
        self.patterns.iter().copied().filter(|p| p.starts_with('.'))
    }

    pub fn filenames(&self) -> impl Iterator<Item = &'static str> {
        self.patterns.iter().copied().filter(|p| !p.starts_with('.'))
    }

    pub fn to_pattern(&self) -> LanguagePattern {
        LanguagePattern {
            canonical_name: self.name.to_string(),
            extensions: self.extensions().map(str::to_string).collect(),
            filenames: self.filenames().map(str::to_string).collect(),
        }
    }
}

/// Canonical name and file patterns of a language, as written to the header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguagePattern {
    pub canonical_name: String,
    /// Always start with `.`
    pub extensions: Vec<String>,
    /// Never start with `.`
    pub filenames: Vec<String>,
}

impl LanguagePattern {
    /// Pattern for a directory the registry does not know: the directory
    /// name doubles as the canonical name and no files are claimed.
    pub fn unknown(dir: &str) -> Self {
        Self {
            canonical_name: dir.to_string(),
            extensions: Vec::new(),
            filenames: Vec::new(),
        }
    }

    /// A language without extensions or filenames cannot be dispatched to
    /// and is skipped by the generator.
    pub fn claims_no_files(&self) -> bool {
        self.extensions.is_empty() && self.filenames.is_empty()
    }
}

macro_rules! lang {
    ($dir:literal => $name:literal, [$($pattern:literal),* $(,)?]) => {
        LanguageEntry {
            dir: $dir,
            name: $name,
            patterns: &[$($pattern),*],
        }
    };
}

const BUILTIN_LANGUAGES: &[LanguageEntry] = &[
    lang!("go" => "go", [".go"]),
    lang!("javascript" => "javascript", [".js", ".jsx", ".mjs"]),
    lang!("typescript" => "typescript", [".ts", ".tsx"]),
    lang!("tsx" => "tsx", [".tsx"]),
    lang!("python" => "python", [".py", ".pyw", ".pyi"]),
    lang!("java" => "java", [".java"]),
    lang!("c" => "c", [".c", ".h"]),
    lang!("cpp" => "cpp", [".cpp", ".cc", ".cxx", ".hpp", ".hxx"]),
    lang!("rust" => "rust", [".rs"]),
    lang!("rust_with_rstml" => "rust_with_rstml", [".rs"]),
    lang!("ruby" => "ruby", [".rb", ".rbw"]),
    lang!("php" => "php", [".php", ".phtml"]),
    lang!("c_sharp" => "csharp", [".cs"]),
    lang!("kotlin" => "kotlin", [".kt", ".kts"]),
    lang!("swift" => "swift", [".swift"]),
    lang!("scala" => "scala", [".scala"]),
    lang!("haskell" => "haskell", [".hs", ".lhs"]),
    lang!("ocaml" => "ocaml", [".ml", ".mli"]),
    lang!("fsharp" => "fsharp", [".fs", ".fsx"]),
    lang!("clojure" => "clojure", [".clj", ".cljs"]),
    lang!("erlang" => "erlang", [".erl"]),
    lang!("elixir" => "elixir", [".ex", ".exs"]),
    lang!("elm" => "elm", [".elm"]),
    lang!("bash" => "bash", [".sh", ".bash"]),
    lang!("fish" => "fish", [".fish"]),
    lang!("sql" => "sql", [".sql"]),
    lang!("html" => "html", [".html", ".htm"]),
    lang!("css" => "css", [".css"]),
    lang!("xml" => "xml", [".xml"]),
    lang!("json" => "json", [".json"]),
    lang!("yaml" => "yaml", [".yaml", ".yml"]),
    lang!("toml" => "toml", [".toml"]),
    lang!("ini" => "ini", [".ini"]),
    lang!("markdown" => "markdown", [".md", ".markdown"]),
    lang!("markdown_inline" => "markdown_inline", [".md", ".markdown"]),
    lang!("dockerfile" => "dockerfile", [".dockerfile", "Dockerfile"]),
    lang!("make" => "make", [".makefile", "Makefile"]),
    lang!("lua" => "lua", [".lua"]),
    lang!("perl" => "perl", [".pl", ".pm"]),
    lang!("r" => "r", [".r", ".R"]),
    lang!("dart" => "dart", [".dart"]),
    lang!("crystal" => "crystal", [".cr"]),
    lang!("nim" => "nim", [".nim"]),
    lang!("nim_format_string" => "nim_format_string", [".nim"]),
    lang!("fortran" => "fortran", [".f", ".f90", ".f95"]),
    lang!("commonlisp" => "commonlisp", [".lisp", ".lsp"]),
    lang!("cmake" => "cmake", [".cmake", "CMakeLists.txt"]),
    lang!("tcl" => "tcl", [".tcl"]),
    lang!("hcl" => "hcl", [".hcl", ".tf"]),
    // Template languages
    lang!("gotmpl" => "gotmpl", [".gotmpl", ".go.tmpl"]),
    lang!("helm" => "helm", [".yaml", ".yml"]),
    // Configuration files
    lang!("git_config" => "git_config", [".gitconfig"]),
    lang!("gitignore" => "gitignore", [".gitignore"]),
    lang!("gitattributes" => "gitattributes", [".gitattributes"]),
    lang!("ssh_config" => "ssh_config", ["ssh_config"]),
    lang!("dotenv" => "dotenv", [".env"]),
    lang!("properties" => "properties", [".properties"]),
    lang!("gowork" => "gowork", ["go.work"]),
    lang!("gosum" => "gosum", ["go.sum"]),
    // Data formats
    lang!("csv" => "csv", [".csv"]),
    lang!("psv" => "psv", [".psv"]),
    lang!("proxima" => "proxima", [".proxima"]),
    lang!("proto" => "proto", [".proto"]),
    lang!("prql" => "prql", [".prql"]),
    // Documentation
    lang!("latex" => "latex", [".tex", ".ltx"]),
    lang!("ansible" => "ansible", [".yml", ".yaml"]),
];

/// Read-only table of known grammar directories.
#[derive(Debug, Clone, Copy)]
pub struct LanguageRegistry {
    entries: &'static [LanguageEntry],
}

impl LanguageRegistry {
    /// The registry compiled into the binary
    pub const fn builtin() -> Self {
        Self {
            entries: BUILTIN_LANGUAGES,
        }
    }

    pub fn entries(&self) -> &'static [LanguageEntry] {
        self.entries
    }

    pub fn lookup(&self, dir: &str) -> Option<&'static LanguageEntry> {
        self.entries.iter().find(|entry| entry.dir == dir)
    }

    /// Header pattern for `dir`, falling back to [`LanguagePattern::unknown`].
    pub fn pattern_for(&self, dir: &str) -> LanguagePattern {
        self.lookup(dir)
            .map(LanguageEntry::to_pattern)
            .unwrap_or_else(|| LanguagePattern::unknown(dir))
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
