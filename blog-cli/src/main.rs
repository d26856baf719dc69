use std::process;

use anyhow::{Context, Result};
use blog_client::{BlogClient, BlogClientError, DEFAULT_BASE_URL, NewPost, Post};
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "blog-cli", version, about = "CLI клиент для blog-server")]
struct Cli {
    /// Адрес эндпоинта (можно задать через BLOG_API_URL).
    #[arg(long, global = true, env = "BLOG_API_URL")]
    server: Option<String>,

    /// Печатать ответ сервера как JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Список всех постов, от новых к старым.
    List,
    /// Создание поста. Незаданные поля заполнит сервер.
    Create {
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        author: Option<String>,
    },
    /// Проверка CORS preflight (OPTIONS).
    Preflight,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    if let Err(err) = run().await {
        eprintln!("Ошибка: {err}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let server = normalize_server(cli.server.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()));
    let client = BlogClient::new(server).context("не удалось создать HTTP-клиент")?;

    match cli.command {
        Command::List => {
            let posts = client.list_posts().await.map_err(map_client_error)?;
            if cli.json {
                print_json(&posts)?;
            } else {
                print_list(&posts);
            }
        }
        Command::Create {
            title,
            content,
            author,
        } => {
            let post = client
                .create_post(&build_new_post(title, content, author))
                .await
                .map_err(map_client_error)?;
            if cli.json {
                print_json(&post)?;
            } else {
                print_post("Пост создан", &post);
            }
        }
        Command::Preflight => {
            let message = client.preflight().await.map_err(map_client_error)?;
            println!("preflight: {message}");
        }
    }

    Ok(())
}

fn normalize_server(server: String) -> String {
    if server.starts_with("http://") || server.starts_with("https://") {
        return server;
    }

    format!("http://{server}")
}

fn build_new_post(
    title: Option<String>,
    content: Option<String>,
    author: Option<String>,
) -> NewPost {
    NewPost {
        title,
        content,
        author,
    }
}

fn map_client_error(err: BlogClientError) -> anyhow::Error {
    let message = match err {
        BlogClientError::Api { status, message } => {
            format!("сервер ответил ошибкой (status={status}): {message}")
        }
        BlogClientError::Http(err) => format!("ошибка HTTP: {err}"),
        BlogClientError::Decode(message) => format!("не удалось разобрать ответ: {message}"),
    };
    anyhow::anyhow!(message)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let raw = serde_json::to_string_pretty(value).context("не удалось сериализовать ответ")?;
    println!("{raw}");
    Ok(())
}

fn print_post(title: &str, post: &Post) {
    println!("{title}");
    println!("PostID: {}", post.post_id);
    println!("title: {}", post.title);
    println!("content: {}", post.content);
    println!("author: {}", post.author);
    println!("dateCreated: {}", post.date_created.to_rfc3339());
}

fn print_list(posts: &[Post]) {
    println!("Постов: {}", posts.len());

    for post in posts {
        println!("{}", format_list_line(post));
    }
}

fn format_list_line(post: &Post) -> String {
    format!(
        "- [{}] {}, автор: {} ({})",
        post.post_id,
        post.title,
        post.author,
        post.date_created.format("%Y-%m-%d")
    )
}
