//! Result-row type generation: one class per procedure result set.

use crate::emitter::CodeWriter;
use crate::error::Result;
use crate::model::ProcedureDescriptor;
use crate::types::TypeResolver;

const USINGS: &[&str] = &["using System;", "using System.Collections.Generic;"];

/// Generate the source of the result-row type for `procedure`.
pub fn generate<R>(
    procedure: &ProcedureDescriptor,
    namespace: &str,
    type_name: &str,
    resolver: &R,
) -> Result<String>
where
    R: TypeResolver + ?Sized,
{
    let mut out = CodeWriter::new();
    write_result_type(&mut out, procedure, namespace, type_name, resolver)?;
    Ok(out.into_text())
}

/// Write a complete result-type file into `out`.
pub fn write_result_type<R>(
    out: &mut CodeWriter,
    procedure: &ProcedureDescriptor,
    namespace: &str,
    type_name: &str,
    resolver: &R,
) -> Result<()>
where
    R: TypeResolver + ?Sized,
{
    out.append_header();
    out.append_lines(USINGS.iter().copied());
    out.append_blank_line();
    out.append_line(format!("namespace {namespace}"));
    out.append_line("{");
    {
        let mut body = out.indent();
        write_class(&mut body, procedure, type_name, resolver)?;
    }
    out.append_line("}");
    Ok(())
}

fn write_class<R>(
    out: &mut CodeWriter,
    procedure: &ProcedureDescriptor,
    type_name: &str,
    resolver: &R,
) -> Result<()>
where
    R: TypeResolver + ?Sized,
{
    out.append_line(format!("public partial class {type_name}"));
    out.append_line("{");
    {
        let mut body = out.indent();
        // Column names are emitted verbatim.
        for column in procedure.columns_by_ordinal() {
            let reference = resolver.resolve_clr_type(&column.native_type)?;
            body.append_line(format!(
                "public {} {} {{ get; set; }}",
                resolver.render_type_reference(&reference),
                column.name
            ));
        }
    }
    out.append_line("}");
    Ok(())
}
