//! Scaffolding orchestration and persistence.

use crate::error::{Result, ScaffoldError};
use crate::facade;
use crate::ident;
use crate::model::ProcedureModel;
use crate::options::ProcedureScaffolderOptions;
use crate::result_type;
use crate::types::{SqlServerTypeMapper, TypeResolver};
use std::collections::HashMap;
use std::fs;
use std::path::{self, Path, PathBuf};
use tracing::{debug, info};

/// Extension of every generated source file.
pub const SOURCE_EXTENSION: &str = "cs";

/// Generated source text and the path it should be written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldedFile {
    pub code: String,
    pub path: PathBuf,
}

/// All artifacts from one scaffolding run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldedModel {
    /// The facade, at an absolute path
    pub context_file: ScaffoldedFile,
    /// One result type per procedure, relative to the output directory
    pub additional_files: Vec<ScaffoldedFile>,
}

/// Absolute paths written by [`ProcedureScaffolder::save`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedModelFiles {
    pub context_file: PathBuf,
    pub additional_files: Vec<PathBuf>,
}

/// Drives result-type and facade generation over a procedure model.
#[derive(Debug, Clone, Default)]
pub struct ProcedureScaffolder<R = SqlServerTypeMapper> {
    resolver: R,
}

impl ProcedureScaffolder {
    /// Scaffolder using the SQL Server type mapping.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<R: TypeResolver> ProcedureScaffolder<R> {
    pub fn with_resolver(resolver: R) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Generate every artifact for `model`.
    ///
    /// Fails before generating anything when two procedures sanitize to
    /// the same identifier.
    pub fn scaffold_model(
        &self,
        model: &ProcedureModel,
        options: &ProcedureScaffolderOptions,
    ) -> Result<ScaffoldedModel> {
        options.validate()?;
        check_name_collisions(model)?;

        let mut additional_files = Vec::with_capacity(model.procedures.len());
        for procedure in &model.procedures {
            let name = ident::result_type_name(&procedure.name)?;
            let code = result_type::generate(
                procedure,
                &options.model_namespace,
                &name,
                &self.resolver,
            )?;
            debug!(
                schema = %procedure.schema,
                procedure = %procedure.name,
                result_type = %name,
                "generated result type"
            );

            additional_files.push(ScaffoldedFile {
                code,
                path: PathBuf::from(format!("{name}.{SOURCE_EXTENSION}")),
            });
        }

        let code = facade::generate(&model.procedures, options, &self.resolver)?;
        let file_name = format!("{}.{SOURCE_EXTENSION}", options.facade_name());
        let context_file = ScaffoldedFile {
            code,
            path: path::absolute(options.context_dir.join(file_name))?,
        };

        info!(
            procedures = model.procedures.len(),
            context_file = %context_file.path.display(),
            "scaffolded procedure model"
        );

        Ok(ScaffoldedModel {
            context_file,
            additional_files,
        })
    }

    /// Write a scaffolded model under `output_dir`.
    ///
    /// Not atomic: files written before a failure stay on disk.
    pub fn save(
        &self,
        scaffolded: &ScaffoldedModel,
        output_dir: impl AsRef<Path>,
    ) -> Result<SavedModelFiles> {
        let output_dir = output_dir.as_ref();
        fs::create_dir_all(output_dir)?;

        let context_path = path::absolute(output_dir.join(&scaffolded.context_file.path))?;
        if let Some(parent) = context_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&context_path, &scaffolded.context_file.code)?;
        debug!(path = %context_path.display(), "wrote context file");

        let mut additional_files = Vec::with_capacity(scaffolded.additional_files.len());
        for file in &scaffolded.additional_files {
            let path = path::absolute(output_dir.join(&file.path))?;
            fs::write(&path, &file.code)?;
            debug!(path = %path.display(), "wrote result type");
            additional_files.push(path);
        }

        info!(
            output_dir = %output_dir.display(),
            files = additional_files.len() + 1,
            "saved scaffolded model"
        );

        Ok(SavedModelFiles {
            context_file: context_path,
            additional_files,
        })
    }
}

fn check_name_collisions(model: &ProcedureModel) -> Result<()> {
    let mut seen: HashMap<String, &str> = HashMap::new();
    for procedure in &model.procedures {
        let identifier = ident::sanitize(&procedure.name)?;
        if let Some(first) = seen.get(&identifier) {
            return Err(ScaffoldError::NameCollision {
                identifier,
                first: first.to_string(),
                second: procedure.name.clone(),
            });
        }
        seen.insert(identifier, &procedure.name);
    }
    Ok(())
}
