use cardbase_core::{filter_sets, CardCatalog, PageOutcome, SearchController, SearchFilters};

use crate::{
    args::{OutputFormat, SearchArgs, SetsArgs},
    formatters::Printer,
};

pub async fn search_cmd<C: CardCatalog>(catalog: C, args: SearchArgs) -> Result<(), anyhow::Error> {
    let filters = SearchFilters {
        query: args.term.join(" "),
        color: args.color,
        set: args.set,
    };

    let mut controller = SearchController::new(catalog);
    controller.set_filters(filters).await;

    for _ in 1..args.pages {
        if controller.fetch_next_page().await == PageOutcome::Skipped {
            break;
        }
    }

    let session = controller.session();
    let show_hint = args.output == OutputFormat::Pretty && session.has_more();

    Printer::new(args.output).print_cards(session.result_cards())?;

    if show_hint {
        eprintln!(
            "More results available, load them with --pages {}",
            session.page() + 1
        );
    }

    Ok(())
}

pub async fn sets_cmd<C: CardCatalog>(catalog: C, args: SetsArgs) -> Result<(), anyhow::Error> {
    let sets = catalog.list_sets().await?;
    let filtered = filter_sets(&sets, args.filter.as_deref().unwrap_or(""));

    Printer::new(args.output).print_sets(&filtered)?;
    Ok(())
}
