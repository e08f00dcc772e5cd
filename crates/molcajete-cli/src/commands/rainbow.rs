//! `molcajete rainbow`: every kind of SGR color and style on one screen.

use molcajete_core::domain::{AnsiCommand, Paint};
use molcajete_core::prelude::*;

/// Demonstration of ANSI SGR codes.
#[derive(Debug, Default)]
pub struct Rainbow;

impl Command for Rainbow {
    fn info(&self) -> CommandInfo {
        CommandInfo::new().help("demonstrate ANSI colors and text styles")
    }

    fn invoked(&self, ctx: &mut Context) -> MolcajeteResult<Invoked> {
        if !ctx.ansi.is_enabled() {
            println!("You need color support to use this demo");
            return Ok(Invoked::Continue);
        }
        print!("{}", ctx.ansi.cmd(AnsiCommand::EraseDisplay));
        named_colors(ctx)?;
        indexed_colors(ctx)?;
        rgb_bar(ctx)?;
        styles(ctx)?;
        Ok(Invoked::Continue)
    }
}

fn header(ctx: &Context, title: &str) -> MolcajeteResult<()> {
    println!();
    println!("{}", ctx.paint(title, &Style::new().bold().attr(TextStyle::Underline))?);
    println!();
    Ok(())
}

fn named_colors(ctx: &Context) -> MolcajeteResult<()> {
    header(ctx, "Foreground and background colors")?;
    for row in NamedColor::ALL.chunks(8) {
        let mut fg = Vec::new();
        let mut bg = Vec::new();
        for color in row {
            let label = format!(" {} ", color.as_str().to_uppercase());
            fg.push(ctx.paint(&label, &Style::new().fg(*color).bg(Paint::Auto))?);
            bg.push(ctx.paint(&label, &Style::new().fg(Paint::Auto).bg(*color))?);
        }
        println!("{}", fg.join(" "));
        println!("{}", bg.join(" "));
    }
    Ok(())
}

fn indexed_colors(ctx: &Context) -> MolcajeteResult<()> {
    header(ctx, "Indexed 8-bit background colors")?;
    let cell = |index: u8, width: usize| {
        ctx.paint(
            &format!("{index:^width$X}"),
            &Style::new().fg(Paint::Auto).bg(Color::Indexed(index)),
        )
    };

    let base = (0x00..=0x0f)
        .map(|index| cell(index, 4))
        .collect::<MolcajeteResult<Vec<_>>>()?;
    println!("{}", base.join(""));
    println!();

    for row in 0..18u8 {
        let left = (0..6)
            .map(|column| cell(0x10 + 6 * row + column, 4))
            .collect::<MolcajeteResult<Vec<_>>>()?;
        let right = (0..6)
            .map(|column| cell(0x7c + 6 * row + column, 4))
            .collect::<MolcajeteResult<Vec<_>>>()?;
        println!("{}  {}", left.join(""), right.join(""));
    }
    println!();

    for start in [0xe8u8, 0xf4] {
        let grays = (0..12)
            .map(|offset| cell(start + offset, 6))
            .collect::<MolcajeteResult<Vec<_>>>()?;
        println!("{}", grays.join(""));
    }
    Ok(())
}

fn rgb_bar(ctx: &Context) -> MolcajeteResult<()> {
    const COLUMNS: u16 = 80;
    header(ctx, "24 bit RGB colors")?;
    let mut bar = String::new();
    for column in 0..COLUMNS {
        let hue = 360.0 / f32::from(COLUMNS) * f32::from(column);
        bar.push_str(&ctx.paint(" ", &Style::new().bg(hsv(hue, 1.0, 1.0)))?);
    }
    for _ in 0..3 {
        println!("{bar}");
    }
    Ok(())
}

fn styles(ctx: &Context) -> MolcajeteResult<()> {
    header(ctx, "Text styles")?;
    let styled = TextStyle::ALL
        .into_iter()
        .map(|style| ctx.paint(style.as_str(), &Style::new().attr(style)))
        .collect::<MolcajeteResult<Vec<_>>>()?;
    println!("{}", styled.join(" "));
    Ok(())
}

/// Convert hue (degrees), saturation and value (both 0..=1) to RGB.
fn hsv(hue: f32, saturation: f32, value: f32) -> Rgb {
    let chroma = value * saturation;
    let sector = (hue / 60.0).rem_euclid(6.0);
    let x = chroma * (1.0 - (sector % 2.0 - 1.0).abs());
    let (r, g, b) = match sector as u8 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = value - chroma;
    let channel = |c: f32| ((c + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgb::new(channel(r), channel(g), channel(b))
}
