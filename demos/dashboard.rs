//! Paints a static dashboard frame sized to the attached terminal.
//!
//! Run with `cargo run --example dashboard`. Without a terminal the demo
//! falls back to a 100x30 grid so the escape stream can be piped.

use std::io::{Write, stdout};

use boxflow::{
    AnsiRenderer, BoxRegistry, BoxStyle, Result, Size, Sizing, Theme, Tree, TreeBuilder,
    solve, terminal_size,
};

fn build_tree(size: Size, theme: &Theme) -> Result<Tree> {
    let mut builder = TreeBuilder::new();
    builder.open(
        BoxStyle::column()
            .with_fixed(size.width, size.height)
            .with_bg(theme.color("background")?)
            .with_name("root"),
    );

    builder.open(
        BoxStyle::row()
            .with_width(Sizing::Grow)
            .with_height(Sizing::Fixed(1))
            .with_fg(theme.color("text")?)
            .with_bg(theme.color("panel")?)
            .with_name("header"),
    );
    builder.close()?;

    builder.open(
        BoxStyle::row()
            .with_width(Sizing::Grow)
            .with_height(Sizing::Grow)
            .with_gap(1),
    );
    builder.open(
        BoxStyle::column()
            .with_width(Sizing::Fixed(24))
            .with_height(Sizing::Grow)
            .with_fg(theme.color("muted")?)
            .with_bg(theme.color("surface")?)
            .with_name("sidebar"),
    );
    builder.close()?;
    builder.open(
        BoxStyle::column()
            .with_width(Sizing::Grow)
            .with_height(Sizing::Grow)
            .with_fg(theme.color("text")?)
            .with_bg(theme.color("surface")?)
            .with_name("main"),
    );
    builder.close()?;
    builder.close()?;

    builder.open(
        BoxStyle::row()
            .with_width(Sizing::Grow)
            .with_height(Sizing::Fixed(1))
            .with_fg(theme.color("accent")?)
            .with_bg(theme.color("panel")?)
            .with_name("status"),
    );
    builder.close()?;

    builder.close()?;
    Ok(builder.finish())
}

fn main() -> Result<()> {
    let size = terminal_size().unwrap_or(Size::new(100, 30));
    let theme = Theme::default();

    let mut tree = build_tree(size, &theme)?;
    let report = solve(&mut tree);

    let mut registry = BoxRegistry::new();
    registry.sync_layout(&tree);
    registry.apply_content("header", " boxflow dashboard".to_string())?;
    registry.apply_content(
        "status",
        format!(
            " {}x{} | {} boxes | {} grow rounds",
            size.width, size.height, report.boxes, report.grow_rounds
        ),
    )?;
    let dirty = registry.take_dirty();

    let mut out = stdout();
    let mut renderer = AnsiRenderer::with_default();
    renderer.render(&mut out, &tree)?;
    renderer.blit(&mut out, &dirty)?;
    writeln!(out)?;
    Ok(())
}
