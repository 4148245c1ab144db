//! Mock dashboard data: KPI cards, chart series, and tables.
//!
//! Series are finalized numbers; drawing them is up to the client.

use serde::Serialize;

/// A headline metric with its period-over-period change in percent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpi {
    pub title: &'static str,
    pub value: &'static str,
    pub change: i32,
    pub trend: Trend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    /// Zero counts as down, matching the card's colouring.
    pub fn of(change: i32) -> Self {
        if change > 0 { Self::Up } else { Self::Down }
    }
}

impl Kpi {
    fn new(title: &'static str, value: &'static str, change: i32) -> Self {
        Self {
            title,
            value,
            change,
            trend: Trend::of(change),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Point {
    pub label: &'static str,
    pub value: u32,
}

/// Two series sharing one x axis (the line chart).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairPoint {
    pub label: &'static str,
    pub value1: u32,
    pub value2: u32,
}

/// One x-axis label with a value per stacked series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StackedPoint {
    pub label: &'static str,
    pub values: Vec<u32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartCard<T> {
    pub title: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change: Option<i32>,
    pub color: &'static str,
    pub data: Vec<T>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Metric {
    pub label: &'static str,
    pub value: &'static str,
    pub change: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct CountryShare {
    pub country: &'static str,
    pub percentage: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct Invoice {
    pub id: &'static str,
    pub customer: &'static str,
    pub date: &'static str,
    pub amount: &'static str,
}

/// Everything the dashboard home page renders.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub kpis: Vec<Kpi>,
    pub order_rate: ChartCard<PairPoint>,
    pub carrying_costs: ChartCard<Point>,
    pub delivered: ChartCard<Point>,
    pub on_progress: ChartCard<Point>,
    pub sales_by_location: ChartCard<StackedPoint>,
    /// Legend for `sales_by_location`, in series order.
    pub sales_regions: Vec<&'static str>,
    pub warehousing_costs: Vec<Metric>,
    pub deliveries_by_country: Vec<CountryShare>,
    pub summary: Vec<Metric>,
    pub invoices: Vec<Invoice>,
}

fn points(pairs: &[(&'static str, u32)]) -> Vec<Point> {
    pairs
        .iter()
        .map(|&(label, value)| Point { label, value })
        .collect()
}

fn metric(label: &'static str, value: &'static str, change: i32) -> Metric {
    Metric {
        label,
        value,
        change,
    }
}

impl DashboardData {
    pub fn mock() -> Self {
        let order_rate = [
            ("Jan", 120, 100),
            ("Feb", 150, 130),
            ("Mar", 180, 160),
            ("Apr", 200, 180),
            ("May", 220, 200),
            ("Jun", 250, 230),
            ("Jul", 280, 260),
            ("Aug", 300, 280),
            ("Sep", 320, 300),
            ("Oct", 350, 330),
        ]
        .into_iter()
        .map(|(label, value1, value2)| PairPoint {
            label,
            value1,
            value2,
        })
        .collect();

        let sales = [
            ("Jan", [100, 150, 200, 120]),
            ("Feb", [120, 160, 220, 140]),
            ("Mar", [140, 180, 240, 160]),
            ("Apr", [160, 200, 260, 180]),
            ("May", [180, 220, 280, 200]),
            ("Jun", [200, 240, 300, 220]),
            ("Jul", [220, 260, 320, 240]),
            ("Aug", [240, 280, 340, 260]),
            ("Sep", [260, 300, 360, 280]),
        ]
        .into_iter()
        .map(|(label, values)| StackedPoint {
            label,
            values: values.to_vec(),
        })
        .collect();

        Self {
            kpis: vec![
                Kpi::new("Revenue", "$12,234", 25),
                Kpi::new("Costs", "$2,495", -5),
                Kpi::new("Profits", "$9,274", 15),
                Kpi::new("Shipments", "8,472", -10),
            ],
            order_rate: ChartCard {
                title: "Yearly Order Rate",
                value: None,
                change: None,
                color: "#3b82f6",
                data: order_rate,
            },
            carrying_costs: ChartCard {
                title: "Carrying Costs",
                value: Some("$2,847.90"),
                change: Some(25),
                color: "#8b5cf6",
                data: points(&[
                    ("Sun", 400),
                    ("Mon", 500),
                    ("Tue", 450),
                    ("Wed", 600),
                    ("Thu", 550),
                    ("Fri", 700),
                    ("Sat", 650),
                ]),
            },
            delivered: ChartCard {
                title: "Delivered",
                value: Some("2,948"),
                change: Some(25),
                color: "#10b981",
                data: points(&[
                    ("Jan", 200),
                    ("Feb", 250),
                    ("Mar", 300),
                    ("Apr", 350),
                    ("May", 400),
                    ("Jun", 450),
                    ("Jul", 500),
                ]),
            },
            on_progress: ChartCard {
                title: "On Progress",
                value: Some("673"),
                change: Some(25),
                color: "#f59e0b",
                data: points(&[
                    ("Jan", 50),
                    ("Feb", 60),
                    ("Mar", 70),
                    ("Apr", 80),
                    ("May", 90),
                    ("Jun", 100),
                    ("Jul", 110),
                ]),
            },
            sales_by_location: ChartCard {
                title: "Sales by Stores Location",
                value: None,
                change: None,
                color: "#6366f1",
                data: sales,
            },
            sales_regions: vec!["East", "West", "North", "South"],
            warehousing_costs: vec![
                metric("Cost Per Square Foot of Warehouse Space", "$6.53", 5),
                metric("Cost of Warehouse Management Staff Per Year", "$47,500", -3),
                metric("Cost of Warehouse Staff Per Hour", "$11.44", -4),
                metric("Corporate Profit % For Warehouses", "8.83%", 11),
                metric("What Percentage Do 3PL Warehouses Increase Pricing", "2.37%", 4),
            ],
            deliveries_by_country: [
                ("America", 20),
                ("Netherlands", 25),
                ("France", 30),
                ("Spain", 35),
                ("India", 45),
                ("Indonesia", 65),
            ]
            .into_iter()
            .map(|(country, percentage)| CountryShare {
                country,
                percentage,
            })
            .collect(),
            summary: vec![
                metric("Cancelled", "32", 13),
                metric("Delivered", "176", -7),
                metric("Orders", "384", 25),
                metric("Pending", "42", 2),
                metric("Revenue", "$982", 35),
                metric("Refunded", "18", -8),
            ],
            invoices: vec![
                Invoice {
                    id: "#874729",
                    customer: "CD Cahaya Dewi",
                    date: "08/09/23",
                    amount: "$728",
                },
                Invoice {
                    id: "#874730",
                    customer: "SG Samantha Olle",
                    date: "02/11/22",
                    amount: "$182",
                },
                Invoice {
                    id: "#874731",
                    customer: "DG Daniel Gallego",
                    date: "22/08/23",
                    amount: "$456",
                },
                Invoice {
                    id: "#874732",
                    customer: "AD Avery Davis",
                    date: "02/12/22",
                    amount: "$359",
                },
                Invoice {
                    id: "#874733",
                    customer: "TA Taylor Alonso",
                    date: "13/04/23",
                    amount: "$224",
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kpi_trend_follows_sign() {
        assert_eq!(Trend::of(25), Trend::Up);
        assert_eq!(Trend::of(-5), Trend::Down);
        assert_eq!(Trend::of(0), Trend::Down);

        let data = DashboardData::mock();
        let trends: Vec<_> = data.kpis.iter().map(|k| k.trend).collect();
        assert_eq!(trends, vec![Trend::Up, Trend::Down, Trend::Up, Trend::Down]);
    }

    #[test]
    fn stacked_series_match_legend() {
        let data = DashboardData::mock();
        assert!(
            data.sales_by_location
                .data
                .iter()
                .all(|p| p.values.len() == data.sales_regions.len())
        );
    }

    #[test]
    fn serializes_for_front_end() {
        let json = serde_json::to_value(DashboardData::mock()).unwrap();
        assert_eq!(json["kpis"][0]["title"], "Revenue");
        assert_eq!(json["kpis"][0]["trend"], "up");
        assert_eq!(json["orderRate"]["data"][9]["value1"], 350);
        assert!(json["orderRate"].get("value").is_none());
        assert_eq!(json["carryingCosts"]["value"], "$2,847.90");
        assert_eq!(json["deliveriesByCountry"].as_array().unwrap().len(), 6);
        assert_eq!(json["invoices"][0]["id"], "#874729");
    }
}
