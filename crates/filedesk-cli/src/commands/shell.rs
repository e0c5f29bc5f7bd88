//! Interactive shell holding a folder scope across commands.

use std::path::PathBuf;

use tracing::debug;

use crate::commands::auth::{self, LoginArgs};
use crate::commands::file::FileRow;
use crate::commands::folder::{FolderRow, render_tree};
use crate::commands::preview::render_terminal;
use crate::commands::upload::{print_report, upload_paths};
use crate::output::{self, OutputFormat};
use filedesk_core::error::AppError;
use filedesk_core::types::FileId;
use filedesk_entity::file::FileRecord;
use filedesk_service::{DriveContext, PreviewContent, PreviewSession};

use super::input_error;

const HELP: &str = "\
Commands:
  ls                      list folders and files here
  cd <id|name|/|..>       change folder
  mkdir <name>            create a folder here
  rmdir <id|name>         delete a folder
  rm <id|name>            delete a file here
  get <id|name> [dest]    download a file
  put <path>...           upload files or one directory here
  view <id|name> [page]   preview a file
  tree                    show every folder
  whoami                  show the logged-in user
  logout                  forget the session and leave
  help                    show this help
  exit                    leave the shell";

/// One parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ShellCommand {
    List,
    Cd(String),
    Mkdir(String),
    Rmdir(String),
    Rm(String),
    Get { file: String, dest: Option<PathBuf> },
    Put(Vec<PathBuf>),
    View { file: String, page: Option<u32> },
    Tree,
    Whoami,
    Logout,
    Help,
    Exit,
    Empty,
}

impl ShellCommand {
    /// Parse one line; the error is a usage message.
    pub(crate) fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };
        let required = |usage: &str| {
            if rest.is_empty() {
                Err(format!("usage: {usage}"))
            } else {
                Ok(rest.to_string())
            }
        };

        match verb {
            "" => Ok(Self::Empty),
            "ls" | "dir" => Ok(Self::List),
            "cd" => Ok(Self::Cd(if rest.is_empty() { "/".to_string() } else { rest.to_string() })),
            "mkdir" => required("mkdir <name>").map(Self::Mkdir),
            "rmdir" => required("rmdir <id|name>").map(Self::Rmdir),
            "rm" => required("rm <id|name>").map(Self::Rm),
            "get" => {
                let rest = required("get <id|name> [dest]")?;
                let mut parts = rest.split_whitespace();
                let file = parts.next().unwrap_or_default().to_string();
                let dest = parts.next().map(PathBuf::from);
                Ok(Self::Get { file, dest })
            }
            "put" => {
                let rest = required("put <path>...")?;
                Ok(Self::Put(rest.split_whitespace().map(PathBuf::from).collect()))
            }
            "view" | "cat" => {
                let rest = required("view <id|name> [page]")?;
                let mut parts = rest.split_whitespace();
                let file = parts.next().unwrap_or_default().to_string();
                let page = match parts.next() {
                    Some(p) => Some(p.parse::<u32>().map_err(|_| format!("invalid page '{p}'"))?),
                    None => None,
                };
                Ok(Self::View { file, page })
            }
            "tree" => Ok(Self::Tree),
            "whoami" => Ok(Self::Whoami),
            "logout" => Ok(Self::Logout),
            "help" | "?" => Ok(Self::Help),
            "exit" | "quit" | "q" => Ok(Self::Exit),
            other => Err(format!("unknown command '{other}', type 'help'")),
        }
    }
}

/// Whether the shell keeps reading lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Stop,
}

/// Run the interactive loop until `exit`, `logout` or end of input.
pub async fn run(ctx: &DriveContext) -> Result<(), AppError> {
    if !ctx.session.is_authenticated().await {
        output::print_warning("Not logged in");
        let args = LoginArgs {
            email: None,
            password: None,
        };
        auth::login(&args, ctx, OutputFormat::Table).await?;
    }

    ctx.listing.refresh().await?;
    println!("FileDesk shell. Type 'help' for commands.");

    let mut preview = ctx.preview_session();
    loop {
        let prompt = format!("filedesk:{}", ctx.scope.label());
        let line: String = match dialoguer::Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
        {
            Ok(line) => line,
            Err(dialoguer::Error::IO(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => break,
            Err(e) => return Err(input_error(e)),
        };

        let command = match ShellCommand::parse(&line) {
            Ok(command) => command,
            Err(usage) => {
                output::print_error(&usage);
                continue;
            }
        };

        match run_command(ctx, &mut preview, command).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Stop) => break,
            Err(e) => output::print_error(&e.message),
        }
    }

    Ok(())
}

/// Execute one shell command.
pub(crate) async fn run_command(
    ctx: &DriveContext,
    preview: &mut PreviewSession,
    command: ShellCommand,
) -> Result<Flow, AppError> {
    let format = OutputFormat::Table;
    debug!(?command, scope = ?ctx.scope.current_id(), "Shell command");
    match command {
        ShellCommand::Empty => {}
        ShellCommand::List => {
            ctx.listing.refresh().await?;
            let folders: Vec<FolderRow> =
                ctx.listing.subfolders().await.iter().map(FolderRow::from).collect();
            let files: Vec<FileRow> = ctx.listing.files().await.iter().map(FileRow::from).collect();
            if !folders.is_empty() {
                output::print_list(&folders, format);
            }
            output::print_list(&files, format);
        }
        ShellCommand::Cd(target) => {
            let folder = match target.as_str() {
                "/" => None,
                ".." => ctx.listing.parent_of_current().await,
                query => Some(
                    ctx.listing
                        .find_folder(query)
                        .await
                        .ok_or_else(|| AppError::not_found(format!("No folder '{query}'")))?,
                ),
            };
            ctx.listing.select(folder).await?;
        }
        ShellCommand::Mkdir(name) => {
            let folder = ctx.listing.create_folder(&name).await?;
            output::print_success(&format!("Folder '{}' created (id: {})", folder.name, folder.id));
        }
        ShellCommand::Rmdir(query) => {
            let folder = ctx
                .listing
                .find_folder(&query)
                .await
                .ok_or_else(|| AppError::not_found(format!("No folder '{query}'")))?;
            ctx.listing.delete_folder(folder.id).await?;
            output::print_success(&format!("Folder '{}' deleted", folder.name));
        }
        ShellCommand::Rm(query) => {
            let file = find_file(ctx, &query).await?;
            ctx.listing.delete_file(file.id).await?;
            output::print_success(&format!("File '{}' deleted", file.file_name));
        }
        ShellCommand::Get { file, dest } => {
            let file = find_file(ctx, &file).await?;
            let dest = dest.unwrap_or_else(|| PathBuf::from("."));
            let (path, bytes) = ctx.listing.download(&file, &dest).await?;
            output::print_success(&format!("Saved {} ({} bytes)", path.display(), bytes));
        }
        ShellCommand::Put(paths) => {
            let report = upload_paths(ctx, &paths).await?;
            print_report(&report, format);
            ctx.listing.sync().await?;
        }
        ShellCommand::View { file, page } => {
            let file = find_file(ctx, &file).await?;
            preview.open(file.clone());
            let content = preview
                .content()
                .await
                .cloned()
                .unwrap_or_else(PreviewContent::unavailable);
            print!("{}", render_terminal(&file, &content, page)?);
        }
        ShellCommand::Tree => {
            ctx.listing.refresh_folders().await?;
            print!("{}", render_tree(&ctx.listing.folder_tree().await));
        }
        ShellCommand::Whoami => auth::whoami(ctx, format).await?,
        ShellCommand::Logout => {
            preview.close();
            auth::logout(ctx).await?;
            return Ok(Flow::Stop);
        }
        ShellCommand::Help => println!("{HELP}"),
        ShellCommand::Exit => return Ok(Flow::Stop),
    }

    Ok(Flow::Continue)
}

/// A file of the current folder by id, else by exact name.
async fn find_file(ctx: &DriveContext, query: &str) -> Result<FileRecord, AppError> {
    let files = ctx.listing.files().await;
    let by_id = query.parse::<FileId>().ok();
    files
        .iter()
        .find(|f| Some(f.id) == by_id)
        .or_else(|| files.iter().find(|f| f.file_name == query))
        .cloned()
        .ok_or_else(|| AppError::not_found(format!("No file '{query}' in this folder")))
}
