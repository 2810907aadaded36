use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use pindrop::keypad::DistanceClass;
use pindrop::model::FittedClass;

pub fn model_table(classes: &[(DistanceClass, FittedClass)], unfitted: &[(DistanceClass, usize)]) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Class").add_attribute(Attribute::Bold),
        Cell::new("Shape"),
        Cell::new("Loc"),
        Cell::new("Scale"),
        Cell::new("Weight").fg(Color::Cyan),
        Cell::new("Samples"),
    ]);

    for i in 1..=5 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for (class, f) in classes {
        table.add_row(vec![
            Cell::new(class.to_string()).add_attribute(Attribute::Bold),
            Cell::new(format!("{:.3}", f.shape)),
            Cell::new(format!("{:.1}", f.loc)),
            Cell::new(format!("{:.2}", f.scale)),
            Cell::new(format!("{:.4}", f.weight)).fg(Color::Cyan),
            Cell::new(f.samples),
        ]);
    }
    println!("\n{}", table);

    if !unfitted.is_empty() {
        println!("\n⚠️  Classes without enough data to score:");
        for (class, samples) in unfitted {
            println!("   {} ({} sample(s))", class, samples);
        }
    }
}

pub fn ranking_table(rows: &[(String, usize)]) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("True PIN"),
        Cell::new("Guess Rank").fg(Color::Cyan),
    ]);

    for i in 1..=2 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for (i, (pin, rank)) in rows.iter().enumerate() {
        let rank_cell = if *rank == 0 {
            Cell::new(rank).fg(Color::Green)
        } else if *rank < 100 {
            Cell::new(rank).fg(Color::Yellow)
        } else {
            Cell::new(rank)
        };
        table.add_row(vec![Cell::new(i + 1), Cell::new(pin), rank_cell]);
    }
    println!("\n{}", table);
}

pub fn rank_summary(ranks: &[usize]) {
    if ranks.is_empty() {
        return;
    }

    let mut sorted = ranks.to_vec();
    sorted.sort_unstable();

    let mean = sorted.iter().sum::<usize>() as f64 / sorted.len() as f64;
    let median = if sorted.len() % 2 == 0 {
        (sorted[sorted.len() / 2 - 1] + sorted[sorted.len() / 2]) as f64 / 2.0
    } else {
        sorted[sorted.len() / 2] as f64
    };

    println!(
        "\n📊 {} attempt(s): mean guess rank {:.1}, median {:.1}, best {}, worst {}",
        sorted.len(),
        mean,
        median,
        sorted[0],
        sorted[sorted.len() - 1]
    );
    println!("   (random guessing averages 4999.5)");
}
