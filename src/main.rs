//! fontsurvey: collect the locally installed fonts and submit them to the
//! font data repository.
//!
//! With the `gui` feature this opens the webview flow. Otherwise it runs the
//! same two steps interactively in the terminal.

#[cfg(feature = "gui")]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
    fontsurvey::ui::webview_app::run();
}

#[cfg(not(feature = "gui"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    if let Err(e) = console::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "gui"))]
mod console {
    use std::io::{self, BufRead, Write};

    use fontsurvey::app::App;
    use fontsurvey::managers::font_reviewer::FontReviewerTrait;
    use fontsurvey::types::review::ReviewPhase;

    fn prompt(lines: &mut impl Iterator<Item = io::Result<String>>, text: &str) -> io::Result<Option<String>> {
        print!("{}", text);
        io::stdout().flush()?;
        lines.next().transpose()
    }

    /// One line typed at the review prompt.
    #[derive(Debug, PartialEq)]
    enum ReviewInput {
        Submit,
        Recollect,
        /// Zero-based indices, or the token that is not a list number.
        Toggle(Vec<Result<usize, String>>),
    }

    fn parse_review_input(line: &str) -> ReviewInput {
        let line = line.trim();
        if line.is_empty() {
            return ReviewInput::Submit;
        }
        if line.eq_ignore_ascii_case("r") {
            return ReviewInput::Recollect;
        }
        ReviewInput::Toggle(
            line.split(|c: char| c == ',' || c.is_whitespace())
                .filter(|t| !t.is_empty())
                .map(|t| match t.parse::<usize>() {
                    Ok(n) if n > 0 => Ok(n - 1),
                    _ => Err(t.to_string()),
                })
                .collect(),
        )
    }

    fn print_fonts(app: &App) {
        for (i, font) in app.reviewer.fonts().iter().enumerate() {
            let mark = if font.included { "x" } else { " " };
            println!("  [{}] {:>4}  {}", mark, i + 1, font.full_name);
        }
    }

    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        let mut app = App::from_environment()?;
        let runtime = tokio::runtime::Runtime::new()?;
        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();

        println!("Your user-agent string will also be sent:");
        println!("  {}", app.reviewer.user_agent());
        println!();

        // Step 1: collect
        loop {
            if prompt(&mut lines, "Press Enter to collect your local fonts (q to quit): ")?
                .map_or(true, |l| l.trim() == "q")
            {
                return Ok(());
            }
            let source = app.font_source();
            match app.reviewer.collect_fonts(&*source) {
                Ok(count) => {
                    println!("Found {} fonts.", count);
                    break;
                }
                Err(e) => println!("Error: {}", e),
            }
        }

        // Step 2: review and submit
        loop {
            print_fonts(&app);
            let Some(line) = prompt(&mut lines, "Numbers to toggle, r to collect again (blank to continue): ")? else {
                return Ok(());
            };
            match parse_review_input(&line) {
                ReviewInput::Recollect => {
                    let source = app.font_source();
                    match app.reviewer.collect_fonts(&*source) {
                        Ok(count) => println!("Found {} fonts.", count),
                        Err(e) => println!("Error: {}", e),
                    }
                    continue;
                }
                ReviewInput::Toggle(tokens) => {
                    for token in tokens {
                        match token {
                            Ok(index) => {
                                if let Err(e) = app.reviewer.toggle_inclusion(index) {
                                    println!("Error: {}", e);
                                }
                            }
                            Err(bad) => println!("Error: '{}' is not a list number", bad),
                        }
                    }
                    continue;
                }
                ReviewInput::Submit => {}
            }

            let declared_os = prompt(&mut lines, "Operating system (optional): ")?;
            let gateway = app.gateway();
            match runtime.block_on(app.reviewer.submit(&*gateway, declared_os)) {
                Ok(receipt) => {
                    println!("{}", receipt.message);
                    println!("{}", receipt.html_url);
                }
                Err(e) => println!("Error: {}", e),
            }

            if app.reviewer.phase() == ReviewPhase::Done {
                return Ok(());
            }
            if prompt(&mut lines, "Retry? [Y/n] ")?.map_or(true, |l| l.trim().eq_ignore_ascii_case("n")) {
                return Ok(());
            }
        }
    }

}
