//! Compiles every extension attached to one schematic

use std::path::PathBuf;

use crate::audio::AudioEncoder;
use crate::compiler::{prepare_output_dir, CompileContext, CompileOptions, SchematicExtension};
use crate::config::ExportConfig;
use crate::error::CompileError;
use crate::hierarchy::AuthoredHierarchy;

/// Outcome of compiling a schematic's extensions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileSummary {
    pub succeeded: usize,
    pub failed: usize,
    /// Artifacts written, in extension order
    pub artifacts: Vec<PathBuf>,
}

impl CompileSummary {
    /// Whether every attempted extension compiled
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// Number of extensions attempted
    pub fn attempted(&self) -> usize {
        self.succeeded + self.failed
    }
}

/// Extensions attached to one authored schematic
pub struct SchematicExtensionManager {
    schematic_name: String,
    hierarchy: AuthoredHierarchy,
    extensions: Vec<Box<dyn SchematicExtension>>,
    config: ExportConfig,
    options: CompileOptions,
}

impl SchematicExtensionManager {
    pub fn new(schematic_name: impl Into<String>, hierarchy: AuthoredHierarchy) -> Self {
        Self {
            schematic_name: schematic_name.into(),
            hierarchy,
            extensions: Vec::new(),
            config: ExportConfig::default(),
            options: CompileOptions::default(),
        }
    }

    pub fn with_config(mut self, config: ExportConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_options(mut self, options: CompileOptions) -> Self {
        self.options = options;
        self
    }

    /// Attach an extension
    pub fn with_extension(mut self, extension: impl SchematicExtension + 'static) -> Self {
        self.add_extension(extension);
        self
    }

    /// Attach an extension
    pub fn add_extension(&mut self, extension: impl SchematicExtension + 'static) {
        self.extensions.push(Box::new(extension));
    }

    pub fn schematic_name(&self) -> &str {
        &self.schematic_name
    }

    pub fn hierarchy(&self) -> &AuthoredHierarchy {
        &self.hierarchy
    }

    pub fn extensions(&self) -> &[Box<dyn SchematicExtension>] {
        &self.extensions
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    /// Compile every extension
    pub fn compile_all(&self, encoder: Option<&mut dyn AudioEncoder>) -> Result<CompileSummary, CompileError> {
        let selected = vec![true; self.extensions.len()];
        self.compile_selected(&selected, encoder)
    }

    /// Compile the extensions whose flag is set; missing flags count as unset.
    ///
    /// Only output directory preparation is fatal. Each extension's failure
    /// is logged and counted.
    pub fn compile_selected(
        &self,
        selected: &[bool],
        mut encoder: Option<&mut dyn AudioEncoder>,
    ) -> Result<CompileSummary, CompileError> {
        let export_root = self.config.export_root();
        let dir = prepare_output_dir(&export_root, &self.schematic_name, self.config.clean_output)?;

        let mut summary = CompileSummary::default();
        for (i, extension) in self.extensions.iter().enumerate() {
            if !selected.get(i).copied().unwrap_or(false) {
                continue;
            }

            let mut ctx = CompileContext::new(&self.schematic_name, dir.clone(), &self.hierarchy)
                .with_options(self.options);
            if let Some(encoder) = encoder.as_deref_mut() {
                ctx = ctx.with_encoder(encoder);
            }

            match extension.compile(&mut ctx) {
                Ok(path) => {
                    summary.succeeded += 1;
                    summary.artifacts.push(path);
                }
                Err(e) => {
                    log::error!(
                        "[{}] {} extension failed to compile: {}",
                        self.schematic_name,
                        extension.extension_type(),
                        e
                    );
                    summary.failed += 1;
                }
            }
        }

        if summary.failed > 0 {
            log::warn!(
                "[{}] Compiled {} extension(s), {} failed",
                self.schematic_name,
                summary.succeeded,
                summary.failed
            );
        } else if !self.options.suppress_logs {
            log::info!(
                "[{}] Compiled {} extension(s) to {}",
                self.schematic_name,
                summary.succeeded,
                dir.display()
            );
        }
        Ok(summary)
    }
}
