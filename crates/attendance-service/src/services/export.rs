//! Class report workbook
//!
//! Layout of the single `Attendance` sheet (0-based rows):
//! row 0 holds the merged title, row 1 is blank, row 2 holds the column
//! headers and each student follows from row 3 on.

use attendance_core::aggregation::{Standing, StudentAttendanceRow};
use attendance_core::value_objects::Population;
use rust_xlsxwriter::{Color, Format, FormatAlign, Workbook, XlsxError};
use tracing::instrument;

use super::error::{ServiceError, ServiceResult};

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const SHEET_NAME: &str = "Attendance";
const HEADERS: [&str; 3] = ["Name", "Enrollment Number", "Attendance %"];
const COLUMN_WIDTHS: [f64; 3] = [25.0, 20.0, 15.0];
const TITLE_ROW: u32 = 0;
const HEADER_ROW: u32 = 2;
const FIRST_DATA_ROW: u32 = 3;

/// A generated workbook ready for download
#[derive(Debug, Clone)]
pub struct ReportExport {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// `Attendance_Report_{course}_{class}_Sem{semester}.xlsx`
pub fn file_name(population: &Population) -> String {
    format!(
        "Attendance_Report_{}_{}_Sem{}.xlsx",
        population.course, population.class, population.semester
    )
}

/// Render already-aggregated rows into a workbook
#[instrument(skip(population, rows), fields(population = %population, students = rows.len()))]
pub fn export_class_report(
    population: &Population,
    rows: &[StudentAttendanceRow],
) -> ServiceResult<ReportExport> {
    let bytes = build_workbook(population, rows)
        .map_err(|e| ServiceError::internal(format!("failed to build workbook: {e}")))?;

    Ok(ReportExport {
        file_name: file_name(population),
        bytes,
    })
}

fn build_workbook(population: &Population, rows: &[StudentAttendanceRow]) -> Result<Vec<u8>, XlsxError> {
    let title_format = Format::new()
        .set_bold()
        .set_font_size(14)
        .set_align(FormatAlign::Center);
    let header_format = Format::new().set_bold();

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    let last_col = (HEADERS.len() - 1) as u16;
    sheet.merge_range(
        TITLE_ROW,
        0,
        TITLE_ROW,
        last_col,
        &format!("Attendance Report - {}", population.label()),
        &title_format,
    )?;

    for (col, (header, width)) in HEADERS.iter().zip(COLUMN_WIDTHS).enumerate() {
        let col = col as u16;
        sheet.write_string_with_format(HEADER_ROW, col, *header, &header_format)?;
        sheet.set_column_width(col, width)?;
    }

    for (row, student) in (FIRST_DATA_ROW..).zip(rows) {
        sheet.write_string(row, 0, &student.name)?;
        sheet.write_string(row, 1, &student.enrollment_number)?;
        sheet.write_number_with_format(
            row,
            2,
            f64::from(student.percentage()),
            &percentage_format(student.tally.standing()),
        )?;
    }

    workbook.save_to_buffer()
}

/// Green for good standing, red for at risk
fn percentage_format(standing: Standing) -> Format {
    match standing {
        Standing::Good => Format::new()
            .set_font_color(Color::RGB(0x00_61_00))
            .set_background_color(Color::RGB(0xC6_EF_CE)),
        Standing::AtRisk => Format::new()
            .set_font_color(Color::RGB(0x9C_00_06))
            .set_background_color(Color::RGB(0xFF_C7_CE)),
    }
}
