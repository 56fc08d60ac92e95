//! The dashboard page and the flows that keep it in sync with the API.
//!
//! Every successful mutation is followed by a full reload: the collections
//! are always exactly what the last `list` calls returned (or the sample
//! dataset when those failed).

use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::aggregate::Totals;
use crate::api::{HttpGateway, RecordGateway};
use crate::chart::TotalsChart;
use crate::config::CURRENCY_SYMBOL;
use crate::error::{FormError, GatewayError};
use crate::model::{sample_despesas, sample_receitas, NewRecord, Record, RecordKind};
use crate::notify::{Notice, ToastAction, ToastContainer, Toasts};
use crate::session;
use crate::table::{format_currency, RecordTable};

/// Where the displayed records came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Provenance {
    Remote,
    Fallback,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadPhase {
    Idle,
    Loading,
    Loaded(Provenance),
}

#[derive(Clone, Debug, PartialEq)]
pub struct DashboardState {
    pub receitas: Vec<Record>,
    pub despesas: Vec<Record>,
    pub totals: Totals,
    pub phase: LoadPhase,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            receitas: Vec::new(),
            despesas: Vec::new(),
            totals: Totals::default(),
            phase: LoadPhase::Idle,
        }
    }
}

impl DashboardState {
    pub fn loaded(receitas: Vec<Record>, despesas: Vec<Record>, provenance: Provenance) -> Self {
        let totals = Totals::from_records(&receitas, &despesas);
        Self {
            receitas,
            despesas,
            totals,
            phase: LoadPhase::Loaded(provenance),
        }
    }

    /// Same records, marked as refreshing.
    pub fn reloading(&self) -> Self {
        Self {
            phase: LoadPhase::Loading,
            ..self.clone()
        }
    }

    /// Whether create/delete may start. Only once a load has finished: a
    /// mutation during a load would race two reloads against each other.
    pub fn accepts_mutations(&self, busy: bool) -> bool {
        !busy && matches!(self.phase, LoadPhase::Loaded(_))
    }

    pub fn records(&self, kind: RecordKind) -> &[Record] {
        match kind {
            RecordKind::Receitas => &self.receitas,
            RecordKind::Despesas => &self.despesas,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LoadOutcome {
    pub state: DashboardState,
    pub notices: Vec<Notice>,
}

pub const LOAD_FAILED_MESSAGE: &str = "Erro ao carregar dados";
pub const FALLBACK_MESSAGE: &str = "Exibindo dados de exemplo";
pub const REMOVED_MESSAGE: &str = "Item removido!";
pub const REMOVE_FAILED_MESSAGE: &str = "Erro ao remover item";

async fn fetch_both<G>(gateway: &G) -> Result<(Vec<Record>, Vec<Record>), GatewayError>
where
    G: RecordGateway + ?Sized,
{
    let despesas = gateway.list(RecordKind::Despesas).await?;
    let receitas = gateway.list(RecordKind::Receitas).await?;
    Ok((receitas, despesas))
}

/// Fetches both collections. Any failure swaps in the sample dataset.
pub async fn load<G>(gateway: &G) -> LoadOutcome
where
    G: RecordGateway + ?Sized,
{
    match fetch_both(gateway).await {
        Ok((receitas, despesas)) => {
            log::info!(
                "loaded {} receitas and {} despesas",
                receitas.len(),
                despesas.len()
            );
            LoadOutcome {
                state: DashboardState::loaded(receitas, despesas, Provenance::Remote),
                notices: Vec::new(),
            }
        }
        Err(err) => {
            log::error!("{err}");
            log::warn!("showing sample data instead of the user's records");
            LoadOutcome {
                state: DashboardState::loaded(
                    sample_receitas(),
                    sample_despesas(),
                    Provenance::Fallback,
                ),
                notices: vec![Notice::danger(LOAD_FAILED_MESSAGE), Notice::info(FALLBACK_MESSAGE)],
            }
        }
    }
}

/// Result of a create or delete.
#[derive(Clone, Debug, PartialEq)]
pub enum MutationOutcome {
    /// The API accepted the change. The caller reloads, then shows `notice`.
    Applied { notice: Notice },
    /// Nothing changed; the previous state stays on screen.
    Rejected { notice: Notice },
}

/// Validates the raw form input.
///
/// Amounts may be typed the way the page displays them (`1.234,56`): when a
/// comma is present it is the decimal separator and dots group thousands.
pub fn parse_form(descricao: &str, valor: &str) -> Result<(String, f64), FormError> {
    let descricao = descricao.trim();
    if descricao.is_empty() {
        return Err(FormError::EmptyDescription);
    }

    let raw = valor.trim();
    let normalized = if raw.contains(',') {
        raw.replace('.', "").replace(',', ".")
    } else {
        raw.to_string()
    };
    match normalized.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok((descricao.to_string(), v)),
        _ => Err(FormError::InvalidAmount(raw.to_string())),
    }
}

pub async fn create<G>(gateway: &G, kind: RecordKind, descricao: &str, valor: &str) -> MutationOutcome
where
    G: RecordGateway + ?Sized,
{
    let (descricao, valor) = match parse_form(descricao, valor) {
        Ok(parsed) => parsed,
        Err(err) => {
            return MutationOutcome::Rejected {
                notice: Notice::danger(err.to_string()),
            };
        }
    };

    let body = NewRecord::now(descricao, valor);
    match gateway.create(kind, &body).await {
        Ok(()) => MutationOutcome::Applied {
            notice: Notice::success(kind.added_message()),
        },
        Err(err) => {
            log::error!("{err}");
            MutationOutcome::Rejected {
                notice: Notice::danger(kind.add_failed_message()),
            }
        }
    }
}

pub async fn delete<G>(gateway: &G, kind: RecordKind, id: i64) -> MutationOutcome
where
    G: RecordGateway + ?Sized,
{
    match gateway.delete(kind, id).await {
        Ok(()) => MutationOutcome::Applied {
            notice: Notice::danger(REMOVED_MESSAGE),
        },
        Err(err) => {
            log::error!("{err}");
            MutationOutcome::Rejected {
                notice: Notice::danger(REMOVE_FAILED_MESSAGE),
            }
        }
    }
}

/// Text typed into one of the create forms.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormFields {
    pub descricao: String,
    pub valor: String,
}

fn input_ids(kind: RecordKind) -> (&'static str, &'static str) {
    match kind {
        RecordKind::Receitas => ("descricaoReceita", "valorReceita"),
        RecordKind::Despesas => ("descricao", "valor"),
    }
}

#[derive(Properties, PartialEq)]
pub struct DashboardPageProps {
    pub gateway: HttpGateway,
}

#[function_component(DashboardPage)]
pub fn dashboard_page(props: &DashboardPageProps) -> Html {
    let state = use_state(DashboardState::default);
    let toasts = use_reducer(Toasts::default);
    let busy = use_state(|| false);
    let open_modal = use_state(|| None::<RecordKind>);
    let receita_fields = use_state(FormFields::default);
    let despesa_fields = use_state(FormFields::default);

    let notify = {
        let dispatcher = toasts.dispatcher();
        Callback::from(move |notice: Notice| dispatcher.dispatch(ToastAction::Push(notice)))
    };

    let apply_load = {
        let state = state.clone();
        let notify = notify.clone();
        Callback::from(move |outcome: LoadOutcome| {
            state.set(outcome.state);
            for notice in outcome.notices {
                notify.emit(notice);
            }
        })
    };

    {
        let state = state.clone();
        let gateway = props.gateway.clone();
        let apply_load = apply_load.clone();
        use_effect_with_deps(
            move |_| {
                state.set(DashboardState::default().reloading());
                spawn_local(async move {
                    apply_load.emit(load(&gateway).await);
                });
                || ()
            },
            (),
        );
    }

    // Shared tail of create and delete: reload on success, then report.
    let finish_mutation = {
        let gateway = props.gateway.clone();
        let state = state.clone();
        let apply_load = apply_load.clone();
        let notify = notify.clone();
        let busy = busy.clone();
        move |outcome: MutationOutcome| {
            let gateway = gateway.clone();
            let state = state.clone();
            let apply_load = apply_load.clone();
            let notify = notify.clone();
            let busy = busy.clone();
            async move {
                match outcome {
                    MutationOutcome::Applied { notice } => {
                        state.set(state.reloading());
                        apply_load.emit(load(&gateway).await);
                        notify.emit(notice);
                    }
                    MutationOutcome::Rejected { notice } => notify.emit(notice),
                }
                busy.set(false);
            }
        }
    };

    let on_delete = {
        let gateway = props.gateway.clone();
        let state = state.clone();
        let busy = busy.clone();
        let finish_mutation = finish_mutation.clone();
        Callback::from(move |(kind, id): (RecordKind, i64)| {
            if !state.accepts_mutations(*busy) {
                return;
            }
            busy.set(true);
            let gateway = gateway.clone();
            let finish_mutation = finish_mutation.clone();
            spawn_local(async move {
                let outcome = delete(&gateway, kind, id).await;
                finish_mutation(outcome).await;
            });
        })
    };

    let on_submit = {
        let gateway = props.gateway.clone();
        let state = state.clone();
        let busy = busy.clone();
        let open_modal = open_modal.clone();
        let receita_fields = receita_fields.clone();
        let despesa_fields = despesa_fields.clone();
        let finish_mutation = finish_mutation.clone();
        Callback::from(move |kind: RecordKind| {
            if !state.accepts_mutations(*busy) {
                return;
            }
            let fields_handle = match kind {
                RecordKind::Receitas => receita_fields.clone(),
                RecordKind::Despesas => despesa_fields.clone(),
            };
            let fields = (*fields_handle).clone();
            busy.set(true);

            let gateway = gateway.clone();
            let open_modal = open_modal.clone();
            let finish_mutation = finish_mutation.clone();
            spawn_local(async move {
                let outcome = create(&gateway, kind, &fields.descricao, &fields.valor).await;
                if matches!(outcome, MutationOutcome::Applied { .. }) {
                    fields_handle.set(FormFields::default());
                    open_modal.set(None);
                }
                finish_mutation(outcome).await;
            });
        })
    };

    let on_open = {
        let open_modal = open_modal.clone();
        move |kind: RecordKind| {
            let open_modal = open_modal.clone();
            Callback::from(move |_: MouseEvent| open_modal.set(Some(kind)))
        }
    };

    let on_close = {
        let open_modal = open_modal.clone();
        Callback::from(move |_: MouseEvent| open_modal.set(None))
    };

    let on_hide = {
        let dispatcher = toasts.dispatcher();
        Callback::from(move |id| dispatcher.dispatch(ToastAction::Hide(id)))
    };
    let on_remove = {
        let dispatcher = toasts.dispatcher();
        Callback::from(move |id| dispatcher.dispatch(ToastAction::Remove(id)))
    };

    let modal = (*open_modal).map(|kind| {
        let fields = match kind {
            RecordKind::Receitas => receita_fields.clone(),
            RecordKind::Despesas => despesa_fields.clone(),
        };
        let current = (*fields).clone();
        let on_change = Callback::from(move |next: FormFields| fields.set(next));
        html! {
            <RecordModal
                kind={kind}
                fields={current}
                on_change={on_change}
                on_submit={on_submit.clone()}
                on_close={on_close.clone()}
                busy={*busy}
            />
        }
    });

    let totals = state.totals;
    let loading = state.phase == LoadPhase::Loading;
    let locked = !state.accepts_mutations(*busy);
    let showing_samples = state.phase == LoadPhase::Loaded(Provenance::Fallback);

    html! {
        <>
            <Header />
            <main class="container py-4">
                if loading {
                    <p class="text-muted small">{"Carregando..."}</p>
                }
                if showing_samples {
                    <div class="alert alert-warning py-2 small">
                        {"Não foi possível conectar à API. Os valores abaixo são dados de exemplo."}
                    </div>
                }

                <div class="row g-3 mb-4">
                    <StatCard title="Total de Receitas" element_id="totalReceitas" amount={totals.total_receitas} icon={icon_trending_up()} />
                    <StatCard title="Total de Despesas" element_id="totalDespesas" amount={totals.total_despesas} icon={icon_credit_card()} />
                    <StatCard title="Saldo" element_id="saldo" amount={totals.saldo} icon={icon_wallet()} />
                </div>

                <div class="card mb-4">
                    <div class="card-body">
                        <TotalsChart totals={totals} />
                    </div>
                </div>

                <div class="row g-4">
                    { for [RecordKind::Receitas, RecordKind::Despesas].into_iter().map(|kind| html! {
                        <div class="col-lg-6">
                            <div class="card h-100">
                                <div class="card-header d-flex justify-content-between align-items-center">
                                    <h2 class="h5 mb-0">{ kind.title() }</h2>
                                    <button type="button" class="btn btn-sm btn-primary d-flex align-items-center gap-1" onclick={on_open(kind)} disabled={locked}>
                                        { icon_plus() }
                                        { format!("Nova {}", kind.singular()) }
                                    </button>
                                </div>
                                <RecordTable
                                    kind={kind}
                                    records={state.records(kind).to_vec()}
                                    on_delete={on_delete.clone()}
                                    busy={locked}
                                />
                            </div>
                        </div>
                    }) }
                </div>
            </main>
            { for modal }
            <ToastContainer items={toasts.items.clone()} on_hide={on_hide} on_remove={on_remove} />
        </>
    }
}

#[derive(Properties, PartialEq)]
struct RecordModalProps {
    kind: RecordKind,
    fields: FormFields,
    on_change: Callback<FormFields>,
    on_submit: Callback<RecordKind>,
    on_close: Callback<MouseEvent>,
    busy: bool,
}

#[function_component(RecordModal)]
fn record_modal(props: &RecordModalProps) -> Html {
    let kind = props.kind;
    let (descricao_id, valor_id) = input_ids(kind);

    let onsubmit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(kind);
        })
    };

    let on_descricao = {
        let on_change = props.on_change.clone();
        let fields = props.fields.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_change.emit(FormFields {
                descricao: input.value(),
                ..fields.clone()
            });
        })
    };

    let on_valor = {
        let on_change = props.on_change.clone();
        let fields = props.fields.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_change.emit(FormFields {
                valor: input.value(),
                ..fields.clone()
            });
        })
    };

    html! {
        <>
            <div class="modal fade show d-block" id={kind.modal_id()} tabindex="-1" role="dialog" aria-modal="true">
                <div class="modal-dialog">
                    <form class="modal-content" id={kind.form_id()} onsubmit={onsubmit}>
                        <div class="modal-header">
                            <h5 class="modal-title">{ format!("Nova {}", kind.singular()) }</h5>
                            <button type="button" class="btn-close" aria-label="Fechar" onclick={props.on_close.clone()}></button>
                        </div>
                        <div class="modal-body">
                            <div class="mb-3">
                                <label class="form-label">{"Descrição"}</label>
                                <input id={descricao_id} class="form-control" value={props.fields.descricao.clone()} oninput={on_descricao} />
                            </div>
                            <div class="mb-3">
                                <label class="form-label">{ format!("Valor ({})", CURRENCY_SYMBOL) }</label>
                                <input id={valor_id} class="form-control" inputmode="decimal" value={props.fields.valor.clone()} oninput={on_valor} />
                            </div>
                        </div>
                        <div class="modal-footer">
                            <button type="button" class="btn btn-secondary" onclick={props.on_close.clone()}>{"Cancelar"}</button>
                            <button type="submit" class="btn btn-primary" disabled={props.busy}>
                                { if props.busy { "Salvando..." } else { "Salvar" } }
                            </button>
                        </div>
                    </form>
                </div>
            </div>
            <div class="modal-backdrop fade show"></div>
        </>
    }
}

#[function_component(Header)]
fn header() -> Html {
    let on_logout = Callback::from(|_| session::end_session());

    html! {
        <nav class="navbar bg-body-tertiary border-bottom">
            <div class="container">
                <span class="navbar-brand fw-bold">{"Dashboard Financeiro"}</span>
                <button type="button" class="btn btn-outline-secondary btn-sm d-flex align-items-center gap-1" onclick={on_logout}>
                    { icon_log_out() }
                    {"Sair"}
                </button>
            </div>
        </nav>
    }
}

#[derive(Properties, PartialEq)]
struct StatCardProps {
    title: &'static str,
    element_id: &'static str,
    amount: f64,
    icon: Html,
}

#[function_component(StatCard)]
fn stat_card(props: &StatCardProps) -> Html {
    let amount_class = if props.amount < 0.0 {
        "h4 mb-0 text-danger"
    } else {
        "h4 mb-0"
    };

    html! {
        <div class="col-md-4">
            <div class="card h-100">
                <div class="card-body d-flex justify-content-between align-items-start">
                    <div>
                        <p class="text-muted small text-uppercase fw-bold mb-1">{ props.title }</p>
                        <p id={props.element_id} class={amount_class}>{ format_currency(props.amount, CURRENCY_SYMBOL) }</p>
                    </div>
                    <div class="p-2 bg-light rounded">{ props.icon.clone() }</div>
                </div>
            </div>
        </div>
    }
}

fn icon_base(path: &'static str) -> Html {
    html! {
        <svg width="18" height="18" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">
            <path d={path}></path>
        </svg>
    }
}

fn icon_wallet() -> Html {
    icon_base("M3 7h18v10H3zM16 7V5H5v2")
}
fn icon_trending_up() -> Html {
    icon_base("M3 17l6-6 4 4 7-7")
}
fn icon_credit_card() -> Html {
    icon_base("M3 7h18v10H3zM3 11h18")
}
fn icon_log_out() -> Html {
    icon_base("M9 21H5a2 2 0 01-2-2V5a2 2 0 012-2h4M16 17l5-5-5-5M21 12H9")
}
fn icon_plus() -> Html {
    icon_base("M12 5v14M5 12h14")
}
