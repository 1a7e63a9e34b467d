use clap::Parser;
use miette::Result;
use phonedir::cli::commands::{completions, init, list, lookup, record, status};
use phonedir::cli::{Cli, Commands};
use phonedir::core::{logging, Config, LookupTable, Workspace};

fn main() -> Result<()> {
    // Reset SIGPIPE so piping into `head` terminates quietly instead of panicking
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;

    let workspace = Workspace::discover().ok();
    let config = Config::load(workspace.as_ref());
    logging::init(global.verbose, config.log_level.as_deref());

    match cli.command {
        Commands::Init(args) => init::run(args),
        Commands::List(args) => list::run(args, &global),
        Commands::Add(args) => record::run_add(args, &global),
        Commands::Update(args) => record::run_update(args, &global),
        Commands::Delete(args) => record::run_delete(args, &global),
        Commands::Show(args) => record::run_show(args, &global),
        Commands::Surnames(cmd) => lookup::run(LookupTable::Surnames, cmd, &global),
        Commands::Names(cmd) => lookup::run(LookupTable::Names, cmd, &global),
        Commands::Patronymics(cmd) => lookup::run(LookupTable::Patronymics, cmd, &global),
        Commands::Status(args) => status::run(args, &global),
        Commands::Completions(args) => completions::run(args),
    }
}
