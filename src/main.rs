use std::rc::Rc;

use tokio::io::{AsyncBufReadExt, BufReader};

mod config;
mod console;
mod dispatch;
mod error;
mod http;
mod logger;
mod page;

use console::Command;
use dispatch::{DispatchContext, GetDispatcher, PostDispatcher};
use page::{InputField, OutputElement, Page};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load()?;
    logger::init(&cfg)?;

    // One cooperative UI thread: a current-thread runtime driving a LocalSet
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let local = tokio::task::LocalSet::new();
    let result = local.block_on(&runtime, async_main(cfg));
    if let Err(ref e) = result {
        logger::log_error(&e.to_string());
    }
    result
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let remote_base = cfg.remote_base()?;
    let transport = Rc::new(http::HyperTransport::from_config(&cfg)?);

    let page = Page::from_config(&cfg.page);
    let (get_input, get_output) = lookup(&page, &cfg.page.get_input, &cfg.page.get_output)?;
    let (post_input, post_output) = lookup(&page, &cfg.page.post_input, &cfg.page.post_output)?;

    for output in [&get_output, &post_output] {
        output.subscribe(|el| logger::log_render(el.id(), &el.inner_markup()));
    }

    let ctx = DispatchContext::from_config(&cfg);
    let get = GetDispatcher::new(
        get_input.clone(),
        get_output.clone(),
        cfg.endpoints.clone(),
        Rc::clone(&transport),
        ctx.clone(),
    );
    let post = PostDispatcher::new(
        post_input.clone(),
        post_output.clone(),
        cfg.endpoints.clone(),
        Rc::clone(&transport),
        ctx,
    );

    logger::log_startup(&remote_base, &cfg);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match console::parse_command(&line) {
            Ok(Command::Get(text)) => {
                get_input.set_value(text);
                // Detached: the invocation renders (or logs) on its own
                drop(get.trigger());
            }
            Ok(Command::Post(text)) => {
                post_input.set_value(text);
                drop(post.trigger());
            }
            Ok(Command::Show) => {
                logger::log_info(&format!(
                    "#{} (text)   = {:?}",
                    get_output.id(),
                    get_output.text_content()
                ));
                logger::log_info(&format!(
                    "#{} (markup) = {:?}",
                    post_output.id(),
                    post_output.inner_markup()
                ));
            }
            Ok(Command::Help) => logger::log_info(console::HELP),
            Ok(Command::Quit) => break,
            Ok(Command::Nothing) => {}
            Err(message) => logger::log_warning(&message),
        }
    }

    logger::log_info("Bye");
    Ok(())
}

/// Resolve an input/output pair by element id
fn lookup(page: &Page, input: &str, output: &str) -> Result<(InputField, OutputElement), String> {
    let field = page
        .input(input)
        .ok_or_else(|| format!("No input field with id '{input}'"))?;
    let element = page
        .output(output)
        .ok_or_else(|| format!("No output element with id '{output}'"))?;
    Ok((field, element))
}
