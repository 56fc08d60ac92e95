//! Income vs. expense bar chart, drawn by ECharts.

use charming::{
    Chart, Echarts, WasmRenderer,
    component::{Axis, Grid, Title},
    element::{AxisLabel, AxisPointer, AxisPointerType, AxisType, Tooltip, Trigger},
    series::bar::Bar,
};
use yew::prelude::*;

use crate::aggregate::Totals;
use crate::config::{CHART_ELEMENT_ID, CHART_HEIGHT, CHART_WIDTH, CURRENCY_SYMBOL};

pub fn build_chart(totals: &Totals) -> Chart {
    let currency_label = format!("{} {{value}}", CURRENCY_SYMBOL);

    Chart::new()
        .title(Title::new().text("Receitas x Despesas"))
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Axis)
                .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow)),
        )
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .data(vec!["Receitas", "Despesas"]),
        )
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_label.as_str())),
        )
        .series(
            Bar::new()
                .name("Total")
                .data(vec![totals.total_receitas, totals.total_despesas]),
        )
}

/// Something that can draw a [`Chart`] into a DOM element and later redraw
/// it with new options.
pub trait ChartBackend {
    type Instance;

    fn init(&self, element_id: &str, chart: &Chart) -> Result<Self::Instance, String>;

    fn update(&self, instance: &Self::Instance, chart: &Chart);
}

impl ChartBackend for WasmRenderer {
    type Instance = Echarts;

    fn init(&self, element_id: &str, chart: &Chart) -> Result<Echarts, String> {
        self.render(element_id, chart).map_err(|err| format!("{err:?}"))
    }

    fn update(&self, instance: &Echarts, chart: &Chart) {
        WasmRenderer::update(instance, chart);
    }
}

/// The page's single chart instance.
///
/// The first render initializes the instance on the container element; later
/// renders replace its options in place.
pub struct ChartHandle<B: ChartBackend> {
    backend: B,
    instance: Option<B::Instance>,
}

impl<B: ChartBackend> ChartHandle<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            instance: None,
        }
    }

    pub fn render(&mut self, element_id: &str, chart: &Chart) {
        match &self.instance {
            Some(instance) => self.backend.update(instance, chart),
            None => match self.backend.init(element_id, chart) {
                Ok(instance) => self.instance = Some(instance),
                // Left uninitialized; the next render tries again.
                Err(err) => log::error!("could not initialize chart #{element_id}: {err}"),
            },
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.instance.is_some()
    }
}

#[derive(Properties, PartialEq)]
pub struct TotalsChartProps {
    pub totals: Totals,
}

#[function_component(TotalsChart)]
pub fn totals_chart(props: &TotalsChartProps) -> Html {
    let handle = use_mut_ref(|| ChartHandle::new(WasmRenderer::new(CHART_WIDTH, CHART_HEIGHT)));

    {
        let handle = handle.clone();
        use_effect_with_deps(
            move |totals: &Totals| {
                let mut handle = handle.borrow_mut();
                let was_initialized = handle.is_initialized();
                handle.render(CHART_ELEMENT_ID, &build_chart(totals));
                if !was_initialized && handle.is_initialized() {
                    log::debug!("chart created");
                }
                || ()
            },
            props.totals,
        );
    }

    html! {
        <div id={CHART_ELEMENT_ID} class="w-100 d-flex justify-content-center"></div>
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::model::{sample_despesas, sample_receitas};

    #[derive(Default)]
    struct Calls {
        inits: Cell<u32>,
        updates: Cell<u32>,
        failing_inits: Cell<u32>,
    }

    /// Counts calls instead of touching the DOM.
    struct CountingBackend(Rc<Calls>);

    impl ChartBackend for CountingBackend {
        type Instance = u32;

        fn init(&self, element_id: &str, _chart: &Chart) -> Result<u32, String> {
            let calls = &self.0;
            calls.inits.set(calls.inits.get() + 1);
            if calls.failing_inits.get() > 0 {
                calls.failing_inits.set(calls.failing_inits.get() - 1);
                return Err(format!("#{element_id} not found"));
            }
            Ok(calls.inits.get())
        }

        fn update(&self, _instance: &u32, _chart: &Chart) {
            self.0.updates.set(self.0.updates.get() + 1);
        }
    }

    fn counting_handle() -> (ChartHandle<CountingBackend>, Rc<Calls>) {
        let calls = Rc::new(Calls::default());
        (ChartHandle::new(CountingBackend(calls.clone())), calls)
    }

    #[test]
    fn second_render_updates_the_existing_instance() {
        let (mut handle, calls) = counting_handle();
        let chart = build_chart(&Totals::default());

        handle.render("grafico", &chart);
        handle.render("grafico", &chart);

        assert_eq!(calls.inits.get(), 1);
        assert_eq!(calls.updates.get(), 1);
        assert!(handle.is_initialized());
    }

    #[test]
    fn failed_init_is_retried_on_next_render() {
        let (mut handle, calls) = counting_handle();
        calls.failing_inits.set(1);
        let chart = build_chart(&Totals::default());

        handle.render("grafico", &chart);
        assert!(!handle.is_initialized());

        handle.render("grafico", &chart);

        assert_eq!(calls.inits.get(), 2);
        assert_eq!(calls.updates.get(), 0);
        assert!(handle.is_initialized());
    }

    #[test]
    fn chart_has_both_categories_and_their_totals() {
        let totals = Totals::from_records(&sample_receitas(), &sample_despesas());

        let json = serde_json::to_string(&build_chart(&totals)).unwrap();

        assert!(json.contains("\"Receitas\""));
        assert!(json.contains("\"Despesas\""));
        assert!(json.contains("5300"));
        assert!(json.contains("2170.75"));
    }

    #[test]
    fn y_axis_labels_are_currency() {
        let json = serde_json::to_string(&build_chart(&Totals::default())).unwrap();

        assert!(json.contains("R$ {value}"), "formatter missing in {json}");
    }
}
