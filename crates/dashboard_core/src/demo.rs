//! Fixed demonstration dataset shown while demo mode is on.

use shared::{
    domain::Provider,
    metrics::{
        AdMetrics, AdPreview, CampaignRow, ContentMetrics, ContentRow, DeviceSlice,
        MetricChange, MetricChanges, MetricsData, PeriodBar, TimelinePoint,
    },
};

use crate::mapping::WEEKDAY_LABELS;

const TIMELINE_DAYS: u32 = 30;

pub fn demo_metrics() -> MetricsData {
    MetricsData {
        invested: "R$ 6.302,07".into(),
        result: "28".into(),
        cost_per_result: "R$ 225,07".into(),
        return_rate: "1,42%".into(),
        impressions: "137.567".into(),
        clicks: "1.973".into(),
        cpc: "R$ 3,19".into(),
        cpm: "R$ 45,81".into(),
        timeline_data: demo_timeline(),
        device_data: vec![
            device("Desktop", 1062, "#FF6384"),
            device("Mobile Web", 6918, "#FFDD00"),
        ],
        period_data: WEEKDAY_LABELS
            .iter()
            .zip([8, 6, 7, 5, 4, 3, 2])
            .map(|(period, value)| PeriodBar {
                period: (*period).to_string(),
                value,
            })
            .collect(),
        campaign_data: vec![
            campaign(
                "V - [STR] [GTR] - [Vendas] - [C-S] - [Adv+] - Público Frio Campanha",
                "R$ 2.835,59",
                11,
                "R$ 257,78",
                "1,39%",
            ),
            campaign(
                "V - [34] [GTR] - [Compras Advantage] [C-S] - Públicos Frios",
                "R$ 692,09",
                4,
                "R$ 173,02",
                "1,86%",
            ),
            campaign(
                "V - [45] [STR] - [Vendas] - [C-S] - [ABO] - Públicos Frios",
                "R$ 1.030,51",
                3,
                "R$ 343,5",
                "1,17%",
            ),
            campaign(
                "[42] [STR] - [Vendas] - [C-S] - [ABO] - Público Frio",
                "R$ 979,01",
                3,
                "R$ 326,34",
                "1,06%",
            ),
            campaign(
                "[33] [STR] - [Vendas] - [C-S] - [ABO] - RMKT",
                "R$ 139,53",
                2,
                "R$ 69,77",
                "5%",
            ),
        ],
        ads_data: vec![
            ad("1", "Anúncio 1 - Venda Direta", 53_939, 1973, 4),
            ad("2", "Anúncio 2 - Promoção Especial", 37_567, 1173, 4),
        ],
        best_contents: vec![
            content(
                "1",
                "Vídeo - Apresentação do Produto Premium",
                Provider::Meta,
                (42_500, 1275, 0.03, 85.25, 1.8, 15),
            ),
            content(
                "2",
                "Carrossel - Benefícios do Serviço",
                Provider::Meta,
                (38_200, 956, 0.025, 120.75, 2.1, 8),
            ),
            content(
                "3",
                "Imagem - Promoção Especial",
                Provider::Google,
                (25_600, 640, 0.025, 160.30, 1.5, 4),
            ),
            content(
                "4",
                "Vídeo - Depoimento de Cliente",
                Provider::Meta,
                (18_900, 378, 0.02, 195.50, 2.4, 2),
            ),
            content(
                "5",
                "Texto - Anúncio de Pesquisa",
                Provider::Google,
                (12_300, 246, 0.02, 175.80, 1.2, 3),
            ),
        ],
        changes: Some(MetricChanges {
            invested: MetricChange::new("17,5%", true),
            result: MetricChange::new("22,2%", true),
            cost_per_result: MetricChange::new("5,3%", false),
            return_rate: MetricChange::new("11,9%", true),
            impressions: MetricChange::new("10,5%", true),
            clicks: MetricChange::new("8,8%", true),
            cpc: MetricChange::new("4,9%", false),
            cpm: MetricChange::new("1,2%", false),
        }),
    }
}

// Daily spend between 100 and 399, stable across calls.
fn demo_timeline() -> Vec<TimelinePoint> {
    (1..=TIMELINE_DAYS)
        .map(|day| TimelinePoint {
            date: format!("{day}/04"),
            value: f64::from(100 + (day * 97 + 41) % 300),
        })
        .collect()
}

fn device(name: &str, value: u64, color: &str) -> DeviceSlice {
    DeviceSlice {
        name: name.into(),
        value,
        color: color.into(),
    }
}

fn campaign(
    name: &str,
    invested: &str,
    results: u64,
    cost_per_result: &str,
    return_rate: &str,
) -> CampaignRow {
    CampaignRow {
        campaign: name.into(),
        invested: invested.into(),
        results,
        cost_per_result: cost_per_result.into(),
        return_rate: return_rate.into(),
    }
}

fn ad(id: &str, name: &str, impressions: u64, clicks: u64, conversions: u64) -> AdPreview {
    AdPreview {
        id: id.into(),
        name: name.into(),
        image_url: String::new(),
        metrics: AdMetrics {
            impressions,
            clicks,
            conversions,
        },
    }
}

fn content(
    id: &str,
    title: &str,
    platform: Provider,
    (impressions, clicks, ctr, cost_per_result, frequency, conversions): (
        u64,
        u64,
        f64,
        f64,
        f64,
        u64,
    ),
) -> ContentRow {
    ContentRow {
        id: id.into(),
        title: title.into(),
        platform,
        image_url: Some(String::new()),
        metrics: ContentMetrics {
            impressions,
            clicks,
            ctr,
            cost_per_result,
            frequency,
            conversions,
        },
    }
}
