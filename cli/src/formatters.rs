use std::io::{self, Write};

use cardbase_core::{Card, CardSet, Collection, RecentActivity, RecentCardView};
use chrono::{Local, TimeZone};
use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::args::OutputFormat;

pub struct Printer {
    format: OutputFormat,
    stdout: StandardStream,
}

impl Printer {
    pub fn new(format: OutputFormat) -> Self {
        let choice = match format {
            OutputFormat::Pretty => ColorChoice::Auto,
            _ => ColorChoice::Never,
        };

        Printer {
            format,
            stdout: StandardStream::stdout(choice),
        }
    }

    pub fn print_cards(&mut self, cards: &[Card]) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => self.json(&cards),
            OutputFormat::Plain => {
                for card in cards {
                    writeln!(
                        self.stdout,
                        "{}\t{}\t{}",
                        card.id,
                        card.name,
                        card.set.as_deref().unwrap_or("")
                    )?;
                }
                Ok(())
            }
            OutputFormat::Pretty => {
                if cards.is_empty() {
                    return self.dim("No cards found");
                }
                for card in cards {
                    self.card_line(card)?;
                }
                Ok(())
            }
        }
    }

    pub fn print_card(&mut self, card: &Card) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => self.json(card),
            OutputFormat::Plain => {
                writeln!(self.stdout, "{}\t{}", card.id, card.name)?;
                for line in [&card.mana_cost, &card.type_line, &card.oracle_text]
                    .into_iter()
                    .flatten()
                {
                    writeln!(self.stdout, "{}", line)?;
                }
                Ok(())
            }
            OutputFormat::Pretty => {
                self.stdout
                    .set_color(ColorSpec::new().set_bold(true).set_fg(Some(Color::Cyan)))?;
                write!(self.stdout, "{}", card.name)?;
                self.stdout.reset()?;
                if let Some(cost) = &card.mana_cost {
                    write!(self.stdout, "  {}", cost)?;
                }
                writeln!(self.stdout)?;
                if let Some(type_line) = &card.type_line {
                    writeln!(self.stdout, "{}", type_line)?;
                }
                if let Some(text) = &card.oracle_text {
                    writeln!(self.stdout, "\n{}", text)?;
                }
                if let Some(image) = card.small_image() {
                    self.dim(image)?;
                }
                Ok(())
            }
        }
    }

    pub fn print_collections<'a>(
        &mut self,
        collections: impl IntoIterator<Item = &'a Collection>,
    ) -> io::Result<()> {
        let collections: Vec<&Collection> = collections.into_iter().collect();

        match self.format {
            OutputFormat::Json => self.json(&collections),
            OutputFormat::Plain => {
                for c in collections {
                    writeln!(
                        self.stdout,
                        "{}\t{}\t{}\t{}",
                        c.id,
                        c.name,
                        c.cards.len(),
                        c.is_favorite
                    )?;
                }
                Ok(())
            }
            OutputFormat::Pretty => {
                if collections.is_empty() {
                    return self.dim("No collections");
                }
                for c in collections {
                    let marker = if c.is_favorite { "\u{2665}" } else { " " };
                    write!(self.stdout, "{} ", marker)?;
                    self.stdout.set_color(ColorSpec::new().set_bold(true))?;
                    write!(self.stdout, "{}", c.name)?;
                    self.stdout.reset()?;
                    writeln!(self.stdout, " ({} cards) {}", c.cards.len(), c.id)?;
                }
                Ok(())
            }
        }
    }

    pub fn print_collection(&mut self, collection: &Collection) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => self.json(collection),
            _ => {
                if self.format == OutputFormat::Pretty {
                    self.stdout.set_color(ColorSpec::new().set_bold(true))?;
                    writeln!(self.stdout, "{}", collection.name)?;
                    self.stdout.reset()?;
                    if collection.cards.is_empty() {
                        return self.dim("No cards in this collection.");
                    }
                }
                self.print_cards(&collection.cards)
            }
        }
    }

    pub fn print_activity(&mut self, activity: &[RecentActivity]) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => self.json(&activity),
            _ => {
                if activity.is_empty() && self.format == OutputFormat::Pretty {
                    return self.dim("No recent activity");
                }
                for entry in activity {
                    writeln!(
                        self.stdout,
                        "{}\t{}\t{}\t{}",
                        format_timestamp(entry.timestamp),
                        entry.kind,
                        entry.collection_name,
                        entry.collection_id
                    )?;
                }
                Ok(())
            }
        }
    }

    pub fn print_recent_views(&mut self, views: &[RecentCardView]) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => self.json(&views),
            _ => {
                if views.is_empty() && self.format == OutputFormat::Pretty {
                    return self.dim("No recently viewed cards");
                }
                for view in views {
                    writeln!(
                        self.stdout,
                        "{}\t{}\t{}",
                        format_timestamp(view.timestamp),
                        view.name,
                        view.id
                    )?;
                }
                Ok(())
            }
        }
    }

    pub fn print_sets(&mut self, sets: &[&CardSet]) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => self.json(&sets),
            _ => {
                for set in sets {
                    writeln!(self.stdout, "{}\t{}", set.code, set.name)?;
                }
                Ok(())
            }
        }
    }

    fn card_line(&mut self, card: &Card) -> io::Result<()> {
        self.stdout.set_color(ColorSpec::new().set_bold(true))?;
        write!(self.stdout, "{}", card.name)?;
        self.stdout.reset()?;
        if let Some(set) = &card.set {
            write!(self.stdout, " [{}]", set.to_uppercase())?;
        }
        self.stdout
            .set_color(ColorSpec::new().set_fg(Some(Color::Ansi256(244))))?;
        writeln!(self.stdout, " {}", card.id)?;
        self.stdout.reset()
    }

    fn dim(&mut self, text: &str) -> io::Result<()> {
        self.stdout
            .set_color(ColorSpec::new().set_fg(Some(Color::Ansi256(244))))?;
        writeln!(self.stdout, "{}", text)?;
        self.stdout.reset()
    }

    fn json<T: Serialize + ?Sized>(&mut self, value: &T) -> io::Result<()> {
        let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        writeln!(self.stdout, "{}", json)
    }
}

fn format_timestamp(millis: i64) -> String {
    Local
        .timestamp_millis_opt(millis)
        .single()
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| millis.to_string())
}
