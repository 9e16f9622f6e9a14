use crate::error::Result;
use crate::model::ProcedureModel;
use crate::options::ProcedureScaffolderOptions;
use crate::plugin::{File, ScaffoldRequest, ScaffoldResponse};
use crate::scaffolder::{ProcedureScaffolder, ScaffoldedFile};
use crate::types::TypeResolver;
use prost::Message;
use std::error::Error;
use std::io::{Read, Write};

pub fn run<TFunc>(process: TFunc) -> Result<(), Box<dyn Error>>
where
    TFunc: FnOnce(ScaffoldRequest) -> Result<ScaffoldResponse, Box<dyn Error>>,
{
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run_with_io(stdin.lock(), stdout.lock(), process)
}

pub fn run_with_io<TReader, TWriter, TFunc>(
    mut reader: TReader,
    mut writer: TWriter,
    process: TFunc,
) -> Result<(), Box<dyn Error>>
where
    TReader: Read,
    TWriter: Write,
    TFunc: FnOnce(ScaffoldRequest) -> Result<ScaffoldResponse, Box<dyn Error>>,
{
    let mut input = Vec::new();
    reader.read_to_end(&mut input)?;

    let request = ScaffoldRequest::decode(&input[..])?;
    let response = process(request)?;

    let mut output = Vec::new();
    response.encode(&mut output)?;

    writer.write_all(&output)?;
    Ok(())
}

/// Standard request handler: parse options, convert the model and scaffold.
pub fn scaffold_request<R>(
    scaffolder: &ProcedureScaffolder<R>,
    request: ScaffoldRequest,
) -> Result<ScaffoldResponse>
where
    R: TypeResolver,
{
    let options = ProcedureScaffolderOptions::from_json(&request.plugin_options)?;
    let model = ProcedureModel::try_from(request.model.unwrap_or_default())?;
    let scaffolded = scaffolder.scaffold_model(&model, &options)?;

    Ok(ScaffoldResponse {
        context_file: Some(to_file(scaffolded.context_file)),
        additional_files: scaffolded.additional_files.into_iter().map(to_file).collect(),
    })
}

fn to_file(file: ScaffoldedFile) -> File {
    File {
        name: file.path.to_string_lossy().into_owned(),
        contents: file.code.into_bytes(),
    }
}
