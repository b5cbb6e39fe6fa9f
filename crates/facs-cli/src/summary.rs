use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::types::PlanRunResult;

pub fn print_summary(result: &PlanRunResult) {
    println!("Panel: {}", result.panel.display());
    if result.dry_run {
        println!("Output: (dry run, nothing written)");
    } else {
        println!("Output: {}", result.output_dir.display());
    }
    println!(
        "Samples: {}   Wells per class: {} ({} FMO)   Volume per class: {} µL",
        result.sample_count,
        result.budget.total_wells,
        result.budget.fmo_count,
        result.budget.total_volume
    );

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Class"),
        header_cell("Reagents"),
        header_cell("FMO channels"),
        header_cell("Master mix FSB (µL)"),
        header_cell("Mix remaining (µL)"),
    ]);
    apply_table_style(&mut table);
    for index in 1..=4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    let mut total_reagents = 0usize;
    let mut total_channels = 0usize;
    for summary in &result.classes {
        total_reagents += summary.reagent_count;
        total_channels += summary.fmo_channels;
        table.add_row(vec![
            Cell::new(summary.class.as_str())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(summary.reagent_count),
            Cell::new(summary.fmo_channels),
            Cell::new(summary.master_mix_fsb),
            Cell::new(summary.master_mix_remaining),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total_reagents).add_attribute(Attribute::Bold),
        Cell::new(total_channels).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    println!("{table}");
    for path in &result.written {
        println!("Wrote: {}", path.display());
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
