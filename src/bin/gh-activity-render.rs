use anyhow::{Context, Result};
use clap::Parser;

use gh_activity_digest::cli::{normalize_render, RenderCli};
use gh_activity_digest::render::{run_render, RenderOptions, RenderParams};
use gh_activity_digest::util;
use gh_activity_digest::window::parse_now_override;

fn main() -> Result<()> {
  util::init_tracing();
  let cli = RenderCli::parse();

  if cli.gen_man {
    let page = util::render_man_page::<RenderCli>()?;
    print!("{}", page);
    return Ok(());
  }

  let cfg = normalize_render(cli)?;
  let generated_at = util::effective_now(parse_now_override(cfg.now_override.as_deref()));

  let params = RenderParams {
    dir: cfg.dir,
    output: cfg.output,
    options: RenderOptions {
      include_body: cfg.include_body,
      group_by_repo: cfg.group_by_repo,
      explicit_range: cfg.explicit_range,
      generated_at,
    },
  };

  let written = run_render(&params).with_context(|| format!("rendering {}", params.dir.display()))?;
  println!("Generated: {}", written.display());

  Ok(())
}
