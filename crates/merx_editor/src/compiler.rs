//! Compile pipeline shared by every extension kind

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use merx_core::{schematic_dir, ExtensionType};

use crate::audio::AudioEncoder;
use crate::error::CompileError;
use crate::hierarchy::AuthoredHierarchy;

/// Caller decisions for one compile run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions {
    /// Skip the success log line
    pub suppress_logs: bool,
    /// Write the artifact even if no hitbox survives validation
    pub continue_without_hitboxes: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            suppress_logs: false,
            continue_without_hitboxes: true,
        }
    }
}

impl CompileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_suppress_logs(mut self, suppress: bool) -> Self {
        self.suppress_logs = suppress;
        self
    }

    pub fn with_continue_without_hitboxes(mut self, proceed: bool) -> Self {
        self.continue_without_hitboxes = proceed;
        self
    }
}

/// Everything an extension needs to compile itself
pub struct CompileContext<'a> {
    pub schematic_name: &'a str,
    /// Directory the artifact and its assets are written to
    pub schematic_dir: PathBuf,
    pub hierarchy: &'a AuthoredHierarchy,
    pub options: CompileOptions,
    pub encoder: Option<&'a mut dyn AudioEncoder>,
}

impl<'a> CompileContext<'a> {
    pub fn new(schematic_name: &'a str, schematic_dir: impl Into<PathBuf>, hierarchy: &'a AuthoredHierarchy) -> Self {
        Self {
            schematic_name,
            schematic_dir: schematic_dir.into(),
            hierarchy,
            options: CompileOptions::default(),
            encoder: None,
        }
    }

    pub fn with_options(mut self, options: CompileOptions) -> Self {
        self.options = options;
        self
    }

    /// Attach the audio codec used for PlaySound side-cars
    pub fn with_encoder(mut self, encoder: &'a mut dyn AudioEncoder) -> Self {
        self.encoder = Some(encoder);
        self
    }

    /// Conventional artifact path for an extension kind
    pub fn artifact_path(&self, kind: ExtensionType) -> PathBuf {
        kind.artifact_path(&self.schematic_dir, self.schematic_name)
    }
}

/// An authoring component that compiles to its own artifact
pub trait SchematicExtension {
    /// Kind tag, which also fixes the artifact file name
    fn extension_type(&self) -> ExtensionType;

    /// Compile into the context's schematic directory, returning the artifact path
    fn compile(&self, ctx: &mut CompileContext<'_>) -> Result<PathBuf, CompileError>;
}

/// Output file that is deleted on drop unless committed.
///
/// Any early return between [`ArtifactFile::create`] and
/// [`ArtifactFile::commit`] leaves nothing on disk.
pub struct ArtifactFile {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
}

impl ArtifactFile {
    /// Create (or truncate) the file, creating parent directories
    pub fn create(path: impl Into<PathBuf>) -> Result<Self, CompileError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(&path)?;
        Ok(Self {
            path,
            writer: Some(BufWriter::new(file)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush and keep the file
    pub fn commit(mut self) -> Result<PathBuf, CompileError> {
        self.flush()?;
        self.writer = None;
        Ok(std::mem::take(&mut self.path))
    }
}

impl Write for ArtifactFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.writer {
            Some(writer) => writer.write(buf),
            None => Err(io::Error::new(io::ErrorKind::Other, "artifact already committed")),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.writer {
            Some(writer) => writer.flush(),
            None => Ok(()),
        }
    }
}

impl Drop for ArtifactFile {
    fn drop(&mut self) {
        if self.writer.is_none() {
            return;
        }
        // Close the handle before removing the file.
        self.writer = None;
        if let Err(e) = fs::remove_file(&self.path) {
            log::error!("Failed to remove partial artifact {}: {}", self.path.display(), e);
        }
    }
}

/// Create the schematic's output directory under `export_root`.
///
/// With `clean_output` a stale directory and a stale `{name}.zip` next to it
/// are removed first.
pub fn prepare_output_dir(export_root: &Path, schematic_name: &str, clean_output: bool) -> Result<PathBuf, CompileError> {
    fs::create_dir_all(export_root)?;
    let dir = schematic_dir(export_root, schematic_name);

    if clean_output {
        if dir.exists() {
            fs::remove_dir_all(&dir)?;
        }
        let archive = export_root.join(format!("{}.zip", schematic_name));
        if archive.exists() {
            fs::remove_file(&archive)?;
        }
    }

    fs::create_dir_all(&dir)?;
    Ok(dir)
}
