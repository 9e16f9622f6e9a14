//! Procedure metadata consumed by the scaffolder.
//!
//! The wire model from [`crate::plugin`] is converted once into these types;
//! conversion enforces the invariants the generators rely on.

use crate::error::{Result, ScaffoldError};
use crate::plugin;
use crate::types::StoreType;
use std::collections::HashSet;

/// Native database type descriptor.
///
/// Facets follow SQL Server conventions: zero means unset, a length of
/// `-1` means `max`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeType {
    /// Base store type name without facets, e.g. `nvarchar`
    pub store_type: String,
    pub precision: i32,
    pub scale: i32,
    pub length: i32,
    pub nullable: bool,
}

impl NativeType {
    pub fn new(store_type: impl Into<String>) -> Self {
        Self {
            store_type: store_type.into(),
            precision: 0,
            scale: 0,
            length: 0,
            nullable: false,
        }
    }

    /// Build a descriptor from full store type text, taking facets from
    /// the parenthesized part.
    pub fn from_store_type(store_type: &str) -> Result<Self> {
        let parsed = StoreType::parse(store_type)?;
        let mut native = Self::new(parsed.name.clone());

        match parsed.name.as_str() {
            "decimal" | "numeric" => {
                native.precision = parsed.first.unwrap_or_default();
                native.scale = parsed.second.unwrap_or_default();
            }
            "char" | "nchar" | "varchar" | "nvarchar" | "binary" | "varbinary" => {
                native.length = parsed.first.unwrap_or_default();
            }
            "datetime2" | "datetimeoffset" | "time" => {
                native.scale = parsed.first.unwrap_or_default();
            }
            _ => {}
        }

        Ok(native)
    }

    pub fn with_precision(mut self, precision: i32) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_scale(mut self, scale: i32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_length(mut self, length: i32) -> Self {
        self.length = length;
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterDirection {
    Input,
    /// Collected from metadata but not yet scaffolded
    Output,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDescriptor {
    /// Wire name without the leading `@`
    pub name: String,
    pub native_type: NativeType,
    pub direction: ParameterDirection,
}

impl ParameterDescriptor {
    pub fn input(name: impl Into<String>, native_type: NativeType) -> Self {
        Self {
            name: name.into(),
            native_type,
            direction: ParameterDirection::Input,
        }
    }

    pub fn output(name: impl Into<String>, native_type: NativeType) -> Self {
        Self {
            name: name.into(),
            native_type,
            direction: ParameterDirection::Output,
        }
    }

    pub fn is_output(&self) -> bool {
        self.direction == ParameterDirection::Output
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultColumnDescriptor {
    pub name: String,
    pub ordinal: u32,
    pub native_type: NativeType,
}

impl ResultColumnDescriptor {
    pub fn new(name: impl Into<String>, ordinal: u32, native_type: NativeType) -> Self {
        Self {
            name: name.into(),
            ordinal,
            native_type,
        }
    }
}

/// Parameters split by direction, each half in declaration order.
#[derive(Debug, Default)]
pub struct ParameterPartition<'a> {
    pub inputs: Vec<&'a ParameterDescriptor>,
    pub outputs: Vec<&'a ParameterDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcedureDescriptor {
    pub schema: String,
    pub name: String,
    pub parameters: Vec<ParameterDescriptor>,
    pub result_columns: Vec<ResultColumnDescriptor>,
}

impl ProcedureDescriptor {
    pub fn new(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            name: name.into(),
            parameters: Vec::new(),
            result_columns: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, parameter: ParameterDescriptor) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_column(mut self, column: ResultColumnDescriptor) -> Self {
        self.result_columns.push(column);
        self
    }

    pub fn partition_parameters(&self) -> ParameterPartition<'_> {
        let (outputs, inputs) = self.parameters.iter().partition(|p| p.is_output());
        ParameterPartition { inputs, outputs }
    }

    pub fn input_parameters(&self) -> impl Iterator<Item = &ParameterDescriptor> {
        self.parameters.iter().filter(|p| !p.is_output())
    }

    /// Result columns in ascending ordinal order.
    pub fn columns_by_ordinal(&self) -> Vec<&ResultColumnDescriptor> {
        let mut columns: Vec<_> = self.result_columns.iter().collect();
        columns.sort_by_key(|c| c.ordinal);
        columns
    }
}

/// The full set of procedures for one scaffolding run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcedureModel {
    pub procedures: Vec<ProcedureDescriptor>,
}

impl ProcedureModel {
    pub fn new(procedures: Vec<ProcedureDescriptor>) -> Self {
        Self { procedures }
    }
}

// Wire conversions

impl TryFrom<plugin::NativeType> for NativeType {
    type Error = ScaffoldError;

    fn try_from(wire: plugin::NativeType) -> Result<Self> {
        let mut native = Self::from_store_type(&wire.store_type)?;
        if wire.precision != 0 {
            native.precision = wire.precision;
        }
        if wire.scale != 0 {
            native.scale = wire.scale;
        }
        if wire.length != 0 {
            native.length = wire.length;
        }
        native.nullable = wire.nullable;
        Ok(native)
    }
}

fn native_type_of(
    native_type: Option<plugin::NativeType>,
    procedure: &str,
    member: &str,
) -> Result<NativeType> {
    native_type
        .ok_or_else(|| {
            ScaffoldError::InvalidModel(format!(
                "`{member}` of procedure `{procedure}` has no native type"
            ))
        })?
        .try_into()
}

impl TryFrom<plugin::Procedure> for ProcedureDescriptor {
    type Error = ScaffoldError;

    fn try_from(wire: plugin::Procedure) -> Result<Self> {
        let mut parameters = Vec::with_capacity(wire.parameters.len());
        for parameter in wire.parameters {
            let name = parameter.name.trim_start_matches('@').to_string();
            let native_type = native_type_of(parameter.native_type, &wire.name, &name)?;
            parameters.push(ParameterDescriptor {
                name,
                native_type,
                direction: if parameter.output {
                    ParameterDirection::Output
                } else {
                    ParameterDirection::Input
                },
            });
        }

        let mut seen = HashSet::new();
        let mut result_columns = Vec::with_capacity(wire.result_columns.len());
        for column in wire.result_columns {
            let ordinal = u32::try_from(column.ordinal).map_err(|_| {
                ScaffoldError::InvalidModel(format!(
                    "column `{}` of procedure `{}` has negative ordinal {}",
                    column.name, wire.name, column.ordinal
                ))
            })?;
            if !seen.insert(ordinal) {
                return Err(ScaffoldError::InvalidModel(format!(
                    "procedure `{}` has more than one column at ordinal {ordinal}",
                    wire.name
                )));
            }
            let native_type = native_type_of(column.native_type, &wire.name, &column.name)?;
            result_columns.push(ResultColumnDescriptor {
                name: column.name,
                ordinal,
                native_type,
            });
        }

        Ok(Self {
            schema: wire.schema,
            name: wire.name,
            parameters,
            result_columns,
        })
    }
}

impl TryFrom<plugin::ProcedureModel> for ProcedureModel {
    type Error = ScaffoldError;

    fn try_from(wire: plugin::ProcedureModel) -> Result<Self> {
        let procedures = wire
            .procedures
            .into_iter()
            .map(ProcedureDescriptor::try_from)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { procedures })
    }
}
