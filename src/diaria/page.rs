//! The views of the diárias page.
//!
//! The page shell holds an `#app` element whose contents are replaced by
//! every endpoint that changes the view state. Filtering only replaces the
//! `#resultados` region inside it.

use maud::{Markup, html};
use time::{OffsetDateTime, UtcOffset};

use crate::{
    diaria::{
        Diaria,
        summary::{DiariasView, Filters, MilitarSummary},
        view_state::ViewState,
    },
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_ICON_STYLE, BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, CARD_HEADING_STYLE,
        CARD_STYLE, FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, format_currency, format_date_time,
    },
};

const DELETE_CONFIRMATION: &str = "Tem certeza que deseja excluir esta diária?";
const CONFIRMED_VALS: &str = r#"{"confirmado": true}"#;

/// The full page, with `#app` set to load the records as soon as it appears.
pub fn diarias_page(
    state: &ViewState,
    saldo_mensal: f64,
    local_offset: UtcOffset,
) -> Markup {
    let year = OffsetDateTime::now_utc().to_offset(local_offset).year();

    let content = html!(
        main class=(PAGE_CONTAINER_STYLE)
        {
            header class="text-center"
            {
                h1 class="text-3xl font-extrabold tracking-wide text-red-100"
                {
                    "🏛️ CONTROLE DE DIÁRIAS"
                }
                p class="mt-1 text-sm text-red-300" { "Sistema de Controle do Quartel" }
            }

            div
                id="app"
                class="flex flex-col gap-6"
                hx-get=(endpoints::DIARIAS_API)
                hx-trigger="load"
            {
                (app_contents(state, saldo_mensal, local_offset))
            }

            footer class="text-center text-xs text-red-400"
            {
                "Sistema de Controle de Diárias • " (year)
            }
        }
    );

    base("Controle de Diárias", &content)
}

/// Everything inside `#app`: the balance card, the forms and the results.
pub fn app_contents(state: &ViewState, saldo_mensal: f64, local_offset: UtcOffset) -> Markup {
    let view = state.view(saldo_mensal);

    html!(
        (balance_card(&view, saldo_mensal))
        (insert_form(state))
        (filter_bar(state.filters()))

        div id="resultados" class="flex flex-col gap-6"
        {
            (results_contents(state, &view, local_offset))
        }
    )
}

/// The response to a filter change: the contents of `#resultados` and an
/// out-of-band update for the control that clears the filters.
pub fn filtered_results(state: &ViewState, saldo_mensal: f64, local_offset: UtcOffset) -> Markup {
    let view = state.view(saldo_mensal);

    html!(
        (results_contents(state, &view, local_offset))
        (clear_filters_control(state.filters(), true))
    )
}

fn results_contents(state: &ViewState, view: &DiariasView, local_offset: UtcOffset) -> Markup {
    html!(
        @if !view.resumo.is_empty() {
            (summary_grid(&view.resumo))
        }

        (records_table(state, view, local_offset))
    )
}

fn balance_card(view: &DiariasView, saldo_mensal: f64) -> Markup {
    let (saldo_style, bar_style) = if view.saldo_disponivel >= 0.0 {
        ("text-green-400", "bg-green-600")
    } else {
        ("text-red-500", "bg-red-600")
    };

    html!(
        section id="saldo" class=(CARD_STYLE)
        {
            p class="text-xs font-semibold tracking-widest text-red-300" { "SALDO DISPONÍVEL" }

            p class={ "mt-1 text-4xl font-extrabold " (saldo_style) } data-saldo="true"
            {
                (format_currency(view.saldo_disponivel))
            }

            p class="mt-1 text-sm text-red-200"
            {
                "de " (format_currency(saldo_mensal)) " | Gasto: " (format_currency(view.total_gasto))
            }

            div class="mt-4 h-3 w-full rounded-full bg-red-950 overflow-hidden"
            {
                div
                    class={ "h-full rounded-full " (bar_style) }
                    style=(format!("width: {:.1}%", view.percentual_gasto))
                {}
            }
        }
    )
}

fn insert_form(state: &ViewState) -> Markup {
    let form = state.new_record();

    html!(
        section class=(CARD_STYLE)
        {
            h2 class=(CARD_HEADING_STYLE) { "➕ Nova Diária" }

            form
                hx-post=(endpoints::DIARIAS_API)
                hx-target="#app"
                class="flex flex-col md:flex-row gap-3"
            {
                input
                    type="text"
                    name="militar_nome"
                    placeholder="Nome do Militar"
                    value=(form.militar_nome)
                    class=(FORM_TEXT_INPUT_STYLE);

                input
                    type="number"
                    name="valor"
                    placeholder="Valor (R$)"
                    step="0.01"
                    min="0"
                    value=(form.valor)
                    class=(FORM_TEXT_INPUT_STYLE);

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Inserir" }
            }
        }
    )
}

fn filter_bar(filters: &Filters) -> Markup {
    html!(
        section class=(CARD_STYLE)
        {
            h2 class=(CARD_HEADING_STYLE) { "🔍 Filtros" }

            div class="flex flex-col md:flex-row gap-3"
            {
                form
                    id="filtros"
                    hx-post=(endpoints::FILTERS_API)
                    hx-trigger="input delay:300ms, submit"
                    hx-target="#resultados"
                    class="flex flex-col md:flex-row gap-3 grow"
                {
                    input
                        type="text"
                        name="militar"
                        placeholder="Buscar militar..."
                        value=(filters.militar)
                        class=(FORM_TEXT_INPUT_STYLE);

                    input
                        type="number"
                        name="valor_min"
                        placeholder="Valor mín."
                        step="0.01"
                        value=(filters.valor_min)
                        class=(FORM_TEXT_INPUT_STYLE);

                    input
                        type="number"
                        name="valor_max"
                        placeholder="Valor máx."
                        step="0.01"
                        value=(filters.valor_max)
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                (clear_filters_control(filters, false))
            }
        }
    )
}

/// The container of the "Limpar" button, which is only shown while a filter
/// is set.
fn clear_filters_control(filters: &Filters, out_of_band: bool) -> Markup {
    let swap_oob = out_of_band.then_some("true");

    html!(
        div id="limpar-filtros" hx-swap-oob=[swap_oob]
        {
            @if !filters.is_empty() {
                button
                    type="button"
                    hx-delete=(endpoints::FILTERS_API)
                    hx-target="#app"
                    class=(BUTTON_SECONDARY_STYLE)
                {
                    "Limpar"
                }
            }
        }
    )
}

fn summary_grid(resumo: &[MilitarSummary]) -> Markup {
    html!(
        section id="resumo" class=(CARD_STYLE)
        {
            h2 class=(CARD_HEADING_STYLE) { "📊 Resumo por Militar" }

            ul class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-3 gap-3"
            {
                @for summary in resumo {
                    li class="p-3 rounded-lg border border-red-900 bg-[#1a0505]" data-resumo-card="true"
                    {
                        p class="font-semibold text-red-100" { (summary.nome) }
                        p class="text-sm text-red-300"
                        {
                            (summary.quantidade) " diária"
                            @if summary.quantidade > 1 { "s" }
                            " • " (format_currency(summary.total))
                        }
                    }
                }
            }
        }
    )
}

fn records_table(state: &ViewState, view: &DiariasView, local_offset: UtcOffset) -> Markup {
    let message = if state.is_loading() {
        Some("Carregando...")
    } else if state.records().is_empty() {
        Some("Nenhuma diária registrada.")
    } else if view.filtered.is_empty() {
        Some("Nenhum resultado encontrado com os filtros aplicados.")
    } else {
        None
    };

    html!(
        section id="registros" class=(CARD_STYLE)
        {
            h2 class=(CARD_HEADING_STYLE) { "📋 Registros (" (view.filtered.len()) ")" }

            div class="w-full overflow-x-auto"
            {
                table class="w-full text-sm text-left"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Militar" }
                            th scope="col" class="px-4 py-3 text-right" { "Valor" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Data" }
                            th scope="col" class="px-4 py-3 text-center" { "Ações" }
                        }
                    }

                    tbody
                    {
                        @if let Some(message) = message {
                            tr
                            {
                                td colspan="4" class="px-4 py-6 text-center text-red-300"
                                {
                                    (message)
                                }
                            }
                        } @else {
                            @for diaria in &view.filtered {
                                @match state.editing() {
                                    Some(draft) if draft.id == diaria.id => {
                                        (edit_row(diaria, &draft.militar_nome, &draft.valor, local_offset))
                                    }
                                    _ => {
                                        (record_row(diaria, local_offset))
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    )
}

fn record_row(diaria: &Diaria, local_offset: UtcOffset) -> Markup {
    html!(
        tr class=(TABLE_ROW_STYLE) data-diaria-id=(diaria.id)
        {
            th scope="row" class="px-4 py-3 font-medium text-red-50 whitespace-nowrap"
            {
                (diaria.militar_nome)
            }

            td class="px-4 py-3 text-right tabular-nums" { (format_currency(diaria.valor)) }

            td class=(TABLE_CELL_STYLE) { (format_date_time(diaria.created_at, local_offset)) }

            td class="px-4 py-3 text-center whitespace-nowrap"
            {
                button
                    type="button"
                    title="Editar"
                    hx-get=(format_endpoint(endpoints::EDIT_DIARIA, diaria.id))
                    hx-target="#app"
                    class=(BUTTON_ICON_STYLE)
                {
                    "✏️"
                }

                button
                    type="button"
                    title="Excluir"
                    hx-delete=(format_endpoint(endpoints::DIARIA, diaria.id))
                    hx-confirm=(DELETE_CONFIRMATION)
                    hx-vals=(CONFIRMED_VALS)
                    hx-target="#app"
                    class=(BUTTON_ICON_STYLE)
                {
                    "🗑️"
                }
            }
        }
    )
}

fn edit_row(diaria: &Diaria, militar_nome: &str, valor: &str, local_offset: UtcOffset) -> Markup {
    html!(
        tr class=(TABLE_ROW_STYLE) data-diaria-id=(diaria.id) data-editing="true"
        {
            td class=(TABLE_CELL_STYLE)
            {
                input
                    type="text"
                    name="militar_nome"
                    value=(militar_nome)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            td class=(TABLE_CELL_STYLE)
            {
                input
                    type="number"
                    name="valor"
                    step="0.01"
                    min="0"
                    value=(valor)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            td class=(TABLE_CELL_STYLE) { (format_date_time(diaria.created_at, local_offset)) }

            td class="px-4 py-3 text-center whitespace-nowrap"
            {
                button
                    type="button"
                    title="Salvar"
                    hx-put=(format_endpoint(endpoints::DIARIA, diaria.id))
                    hx-include="closest tr"
                    hx-target="#app"
                    class=(BUTTON_ICON_STYLE)
                {
                    "✓"
                }

                button
                    type="button"
                    title="Cancelar"
                    hx-post=(endpoints::CANCEL_EDIT)
                    hx-target="#app"
                    class=(BUTTON_ICON_STYLE)
                {
                    "✕"
                }
            }
        }
    )
}
