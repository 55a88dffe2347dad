use chrono::Local;
use nutribot::{DatasetInfo, FoodItem, Reply, Status};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
        if self.enabled { format!("{}{}{}", color, s.as_ref(), ansi::RESET) } else { s.as_ref().to_string() }
    }

    pub fn bold(&self, s: impl AsRef<str>) -> String {
        self.paint(s, ansi::BOLD)
    }

    pub fn dim(&self, s: impl AsRef<str>) -> String {
        self.paint(s, ansi::DIM)
    }
}

pub fn print_reply(reply: &Reply, palette: &Palette) {
    let stamp = palette.paint(format!("[{}]", Local::now().format("%H:%M")), ansi::GRAY);
    let text = match reply.status {
        Status::Ok => palette.paint(&reply.text, ansi::GREEN),
        Status::Error => palette.paint(&reply.text, ansi::YELLOW),
    };
    println!("{stamp} {text}\n");
}

pub fn print_info(info: &DatasetInfo, palette: &Palette) {
    println!("{}", palette.paint("━━━ Dataset ━━━", ansi::GRAY));
    print_table("food", info.food_rows, info.food_sample.as_ref(), palette);
    print_table("beverages", info.beverage_rows, info.beverage_sample.as_ref(), palette);
    println!();
}

fn print_table(label: &str, rows: usize, sample: Option<&FoodItem>, palette: &Palette) {
    println!("  {} {}", palette.bold(palette.paint(format!("{label}:"), ansi::CYAN)), palette.paint(format!("{rows} rows"), ansi::GREEN));
    match sample {
        Some(item) => println!(
            "    {} {} {}",
            palette.dim("first:"),
            item.display_name(),
            palette.dim(format!(
                "({} kcal │ carbs {} g │ protein {} g │ fat {} g │ fibre {} g)",
                item.energy_kcal, item.carbs_g, item.protein_g, item.fat_g, item.fibre_g
            ))
        ),
        None => println!("    {}", palette.dim("empty")),
    }
}
