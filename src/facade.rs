//! Facade generation: one partial class exposing an async method per
//! procedure.
//!
//! Each method builds a `SqlParameter` per input parameter, issues
//! `EXEC [schema].[name] @a,@b ` through the context's `SqlQuery`
//! primitive and returns the mapped rows. Output parameters are kept out
//! of the signature, the parameter objects and the EXEC text alike.

use crate::emitter::CodeWriter;
use crate::error::Result;
use crate::ident;
use crate::model::{ParameterDescriptor, ProcedureDescriptor};
use crate::options::ProcedureScaffolderOptions;
use crate::types::TypeResolver;

const USINGS: &[&str] = &[
    "using Microsoft.Data.SqlClient;",
    "using Microsoft.EntityFrameworkCore;",
    "using System;",
    "using System.Collections.Generic;",
    "using System.Threading.Tasks;",
];

/// Generate the facade source for every procedure in `procedures`.
pub fn generate<R>(
    procedures: &[ProcedureDescriptor],
    options: &ProcedureScaffolderOptions,
    resolver: &R,
) -> Result<String>
where
    R: TypeResolver + ?Sized,
{
    let mut out = CodeWriter::new();
    write_facade(&mut out, procedures, options, resolver)?;
    Ok(out.into_text())
}

pub fn write_facade<R>(
    out: &mut CodeWriter,
    procedures: &[ProcedureDescriptor],
    options: &ProcedureScaffolderOptions,
    resolver: &R,
) -> Result<()>
where
    R: TypeResolver + ?Sized,
{
    let context = &options.context_name;
    let facade = options.facade_name();

    out.append_header();
    out.append_lines(USINGS.iter().copied());
    out.append_line(format!("using {};", options.model_namespace));
    out.append_blank_line();
    out.append_line(format!("namespace {}", options.context_namespace));
    out.append_line("{");
    {
        let mut ns = out.indent();
        ns.append_line(format!("public partial class {facade}"));
        ns.append_line("{");
        {
            let mut class = ns.indent();
            class.append_line(format!("private readonly {context} _context;"));
            class.append_blank_line();
            class.append_line(format!("public {facade}({context} context)"));
            class.append_line("{");
            class.indent().append_line("_context = context;");
            class.append_line("}");

            for procedure in procedures {
                class.append_blank_line();
                write_method(&mut class, procedure, resolver)?;
            }
        }
        ns.append_line("}");
    }
    out.append_line("}");
    Ok(())
}

fn write_method<R>(out: &mut CodeWriter, procedure: &ProcedureDescriptor, resolver: &R) -> Result<()>
where
    R: TypeResolver + ?Sized,
{
    let method_name = ident::sanitize(&procedure.name)?;
    let result_type = ident::result_type_name(&procedure.name)?;
    let inputs = procedure.partition_parameters().inputs;

    let mut signature = Vec::with_capacity(inputs.len());
    for parameter in &inputs {
        let reference = resolver.resolve_clr_type(&parameter.native_type)?;
        signature.push(format!(
            "{} {}",
            resolver.render_type_reference(&reference),
            parameter.name
        ));
    }

    out.append_line(format!(
        "public async Task<{result_type}[]> {method_name}({})",
        signature.join(", ")
    ));
    out.append_line("{");
    {
        let mut body = out.indent();
        for parameter in &inputs {
            write_parameter_object(&mut body, parameter, resolver)?;
        }

        let statement = csharp_string_literal(&exec_statement(procedure));
        if inputs.is_empty() {
            body.append_line(format!(
                "var result = await _context.SqlQuery<{result_type}>({statement});"
            ));
        } else {
            let arguments = inputs
                .iter()
                .map(|p| parameter_variable(p))
                .collect::<Vec<_>>()
                .join(", ");
            body.append_line(format!(
                "var result = await _context.SqlQuery<{result_type}>({statement}, {arguments});"
            ));
        }

        body.append_line("return result;");
    }
    out.append_line("}");
    Ok(())
}

fn write_parameter_object<R>(
    out: &mut CodeWriter,
    parameter: &ParameterDescriptor,
    resolver: &R,
) -> Result<()>
where
    R: TypeResolver + ?Sized,
{
    let native = &parameter.native_type;
    let reference = resolver.resolve_clr_type(native)?;

    out.append_line(format!(
        "var {} = new SqlParameter",
        parameter_variable(parameter)
    ));
    out.append_line("{");
    {
        let mut init = out.indent();
        init.append_line(format!("ParameterName = \"{}\",", parameter.name));
        if native.precision > 0 {
            init.append_line(format!("Precision = {},", native.precision));
        }
        if native.scale > 0 {
            init.append_line(format!("Scale = {},", native.scale));
        }
        if native.length > 0 {
            init.append_line(format!("Size = {},", native.length));
        }
        init.append_line(format!(
            "SqlDbType = System.Data.SqlDbType.{},",
            reference.db_type
        ));
        init.append_line(format!("Value = {},", parameter.name));
    }
    out.append_line("};");
    out.append_blank_line();
    Ok(())
}

fn parameter_variable(parameter: &ParameterDescriptor) -> String {
    format!("parameter{}", parameter.name)
}

/// The T-SQL statement that invokes `procedure`.
///
/// Without input parameters this is exactly `EXEC [schema].[name]`;
/// otherwise the input wire names follow, joined by `,` and terminated by
/// a single space.
pub fn exec_statement(procedure: &ProcedureDescriptor) -> String {
    let mut statement = format!(
        "EXEC {}.{}",
        quote_sql_identifier(&procedure.schema),
        quote_sql_identifier(&procedure.name)
    );

    let names: Vec<_> = procedure
        .input_parameters()
        .map(|p| format!("@{}", p.name))
        .collect();
    if !names.is_empty() {
        statement.push(' ');
        statement.push_str(&names.join(","));
        statement.push(' ');
    }
    statement
}

fn quote_sql_identifier(name: &str) -> String {
    format!("[{}]", name.replace(']', "]]"))
}

fn csharp_string_literal(text: &str) -> String {
    format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScaffoldError;
    use crate::model::NativeType;
    use crate::types::SqlServerTypeMapper;

    fn options() -> ProcedureScaffolderOptions {
        ProcedureScaffolderOptions::new("Shop.Models", "Shop.Data", "ShopContext")
    }

    fn get_orders() -> ProcedureDescriptor {
        ProcedureDescriptor::new("dbo", "GetOrders")
            .with_parameter(ParameterDescriptor::input(
                "CustomerId",
                NativeType::new("int"),
            ))
            .with_parameter(ParameterDescriptor::input(
                "Status",
                NativeType::new("nvarchar").with_length(50),
            ))
    }

    #[test]
    fn test_generate_facade() {
        let code = generate(&[get_orders()], &options(), &SqlServerTypeMapper).unwrap();

        let expected = "\
// <auto-generated>
//     This code was generated by a tool.
//     Changes to this file may cause incorrect behavior and will be lost if
//     the code is regenerated.
// </auto-generated>
using Microsoft.Data.SqlClient;
using Microsoft.EntityFrameworkCore;
using System;
using System.Collections.Generic;
using System.Threading.Tasks;
using Shop.Models;

namespace Shop.Data
{
    public partial class ShopContextProcedures
    {
        private readonly ShopContext _context;

        public ShopContextProcedures(ShopContext context)
        {
            _context = context;
        }

        public async Task<GetOrdersResult[]> GetOrders(int CustomerId, string Status)
        {
            var parameterCustomerId = new SqlParameter
            {
                ParameterName = \"CustomerId\",
                SqlDbType = System.Data.SqlDbType.Int,
                Value = CustomerId,
            };

            var parameterStatus = new SqlParameter
            {
                ParameterName = \"Status\",
                Size = 50,
                SqlDbType = System.Data.SqlDbType.NVarChar,
                Value = Status,
            };

            var result = await _context.SqlQuery<GetOrdersResult>(\"EXEC [dbo].[GetOrders] @CustomerId,@Status \", parameterCustomerId, parameterStatus);
            return result;
        }
    }
}
";
        assert_eq!(code, expected);
    }

    #[test]
    fn test_exec_statement_without_parameters() {
        let procedure = ProcedureDescriptor::new("dbo", "ListCustomers");
        assert_eq!(exec_statement(&procedure), "EXEC [dbo].[ListCustomers]");
    }

    #[test]
    fn test_exec_statement_joins_without_spaces() {
        let procedure = ProcedureDescriptor::new("dbo", "P")
            .with_parameter(ParameterDescriptor::input("a", NativeType::new("int")))
            .with_parameter(ParameterDescriptor::input("b", NativeType::new("int")));
        assert_eq!(exec_statement(&procedure), "EXEC [dbo].[P] @a,@b ");
    }

    #[test]
    fn test_exec_statement_escapes_brackets() {
        let procedure = ProcedureDescriptor::new("sales", "Odd]Name");
        assert_eq!(exec_statement(&procedure), "EXEC [sales].[Odd]]Name]");
    }

    #[test]
    fn test_zero_parameter_method() {
        let procedure = ProcedureDescriptor::new("dbo", "ListCustomers");
        let code = generate(&[procedure], &options(), &SqlServerTypeMapper).unwrap();
        assert!(code.contains("public async Task<ListCustomersResult[]> ListCustomers()\n"));
        assert!(code.contains(
            "var result = await _context.SqlQuery<ListCustomersResult>(\"EXEC [dbo].[ListCustomers]\");"
        ));
        assert!(!code.contains("new SqlParameter"));
    }

    #[test]
    fn test_facet_lines_only_when_positive() {
        let procedure = ProcedureDescriptor::new("dbo", "SetPrice")
            .with_parameter(ParameterDescriptor::input(
                "Price",
                NativeType::new("decimal").with_precision(18).with_scale(2),
            ))
            .with_parameter(ParameterDescriptor::input(
                "Note",
                NativeType::new("nvarchar").with_length(-1),
            ));
        let code = generate(&[procedure], &options(), &SqlServerTypeMapper).unwrap();

        assert!(code.contains("Precision = 18,"));
        assert!(code.contains("Scale = 2,"));
        assert!(!code.contains("Size ="));
    }

    #[test]
    fn test_output_parameters_are_left_out() {
        let procedure = ProcedureDescriptor::new("dbo", "CountOrders")
            .with_parameter(ParameterDescriptor::input("CustomerId", NativeType::new("int")))
            .with_parameter(ParameterDescriptor::output("Total", NativeType::new("int")));
        let code = generate(&[procedure], &options(), &SqlServerTypeMapper).unwrap();

        assert!(code.contains("CountOrders(int CustomerId)\n"));
        assert!(!code.contains("parameterTotal"));
        assert!(code.contains("\"EXEC [dbo].[CountOrders] @CustomerId \", parameterCustomerId);"));
    }

    #[test]
    fn test_only_output_parameters_use_bare_exec() {
        let procedure = ProcedureDescriptor::new("dbo", "NextId")
            .with_parameter(ParameterDescriptor::output("Id", NativeType::new("int")));
        let code = generate(&[procedure], &options(), &SqlServerTypeMapper).unwrap();
        assert!(code.contains("SqlQuery<NextIdResult>(\"EXEC [dbo].[NextId]\");"));
    }

    #[test]
    fn test_method_name_is_sanitized() {
        let procedure = ProcedureDescriptor::new("dbo", "Get Orders!");
        let code = generate(&[procedure], &options(), &SqlServerTypeMapper).unwrap();
        assert!(code.contains("Task<GetOrdersResult[]> GetOrders()"));
        assert!(code.contains("\"EXEC [dbo].[Get Orders!]\""));
    }

    #[test]
    fn test_methods_are_separated_by_blank_lines() {
        let procedures = [
            ProcedureDescriptor::new("dbo", "A"),
            ProcedureDescriptor::new("dbo", "B"),
        ];
        let code = generate(&procedures, &options(), &SqlServerTypeMapper).unwrap();
        assert!(code.contains("            return result;\n        }\n\n        public async Task<BResult[]> B()"));
        assert!(code.ends_with("        }\n    }\n}\n"));
    }

    #[test]
    fn test_unsupported_parameter_type_fails() {
        let procedure = ProcedureDescriptor::new("dbo", "P")
            .with_parameter(ParameterDescriptor::input("Area", NativeType::new("geography")));
        let err = generate(&[procedure], &options(), &SqlServerTypeMapper).unwrap_err();
        assert!(matches!(err, ScaffoldError::UnsupportedType(_)));
    }

    #[test]
    fn test_blank_procedure_name_fails() {
        let procedure = ProcedureDescriptor::new("dbo", "  ");
        let err = generate(&[procedure], &options(), &SqlServerTypeMapper).unwrap_err();
        assert!(matches!(err, ScaffoldError::InvalidArgument { .. }));
    }
}
