use std::str::FromStr;

use crate::dom::search::{by_tag, find_all};
use crate::dom::text::text;
use crate::dom::{Document, NodeId};
use crate::error::RowError;

pub const NUM_COLUMNS: usize = 12;

/// One row of the instance type matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceType {
    pub name: String,
    pub cpus: u32,
    /// GiB
    pub memory: f64,
    /// Free-form, e.g. "2 x 40 SSD".
    pub storage: String,
    pub network_spec: String,
    pub processor: String,
    /// GHz
    pub clock_speed: f64,
    pub intel_avx: bool,
    pub intel_avx2: bool,
    pub intel_turbo: bool,
    pub ebs_opt: bool,
    pub enhanced_networking: bool,
}

/// Parse a `<tr>` of the matrix. Columns, in order: name, vCPUs, memory,
/// storage, network, processor, clock speed, then five yes/no flags.
pub fn parse_row(doc: &Document, row: NodeId) -> Result<InstanceType, RowError> {
    let cols = find_all(doc, row, by_tag("td"));
    if cols.len() != NUM_COLUMNS {
        return Err(RowError::ColumnCountMismatch {
            expected: NUM_COLUMNS,
            actual: cols.len(),
        });
    }
    let col = |i: usize| text(doc, cols[i]);
    let yes_no = |i: usize| col(i).to_lowercase() == "yes";

    let name = col(0);
    if name.is_empty() {
        return Err(RowError::EmptyField { field: "Name" });
    }

    Ok(InstanceType {
        name,
        cpus: number("CPUs", col(1))?,
        memory: number("Memory", col(2))?,
        storage: col(3),
        network_spec: col(4),
        processor: col(5),
        clock_speed: number("ClockSpeed", col(6))?,
        intel_avx: yes_no(7),
        intel_avx2: yes_no(8),
        intel_turbo: yes_no(9),
        ebs_opt: yes_no(10),
        enhanced_networking: yes_no(11),
    })
}

fn number<T: FromStr>(field: &'static str, text: String) -> Result<T, RowError> {
    text.parse().map_err(|_| RowError::NumericParse { field, text })
}

/// Look up an instance type by its exact name, e.g. "m4.large".
pub fn find_instance<'a>(catalog: &'a [InstanceType], name: &str) -> Option<&'a InstanceType> {
    catalog.iter().find(|t| t.name == name)
}
