//! Benchmark query catalogs, one per industry vertical.

use super::{Suite, SuiteQuery};

/// Gaming: tournament and player analytics over `playstats`.
pub const GAMING: Suite = Suite {
    vertical: "gaming",
    title: "GAMING",
    queries: &[
        SuiteQuery {
            name: "Tournament Leaderboard",
            description: "Top players in a tournament by score",
            sql: "
            SELECT
                playerid,
                AVG(currentscore) as avg_score,
                SUM(currentplaytime) as total_time,
                MAX(currentlevel) as max_level,
                COUNT(*) as events
            FROM playstats
            WHERE tournamentid = 1 AND gameid = 1
            GROUP BY playerid
            ORDER BY avg_score DESC
            LIMIT 100
            ",
            expected_improvement: "80X",
        },
        SuiteQuery {
            name: "Daily Active Users",
            description: "DAU metrics for the last 30 days",
            sql: "
            SELECT
                DATE_TRUNC('day', stattime) as day,
                gameid,
                COUNT(DISTINCT playerid) as dau,
                SUM(currentplaytime) as total_play_time,
                COUNT(*) as total_events
            FROM playstats
            WHERE stattime >= CURRENT_DATE - INTERVAL '30 days'
            GROUP BY 1, 2
            ORDER BY day DESC, dau DESC
            LIMIT 50
            ",
            expected_improvement: "74X",
        },
        SuiteQuery {
            name: "Player Profile",
            description: "Player's performance across all games",
            sql: "
            SELECT
                gameid,
                AVG(currentscore) as avg_score,
                SUM(currentplaytime) as total_time,
                MAX(currentlevel) as max_level,
                COUNT(*) as total_sessions
            FROM playstats
            WHERE playerid = 42
            GROUP BY gameid
            ORDER BY total_time DESC
            ",
            expected_improvement: "43X",
        },
        SuiteQuery {
            name: "Tournament Overview",
            description: "Aggregate stats per tournament",
            sql: "
            SELECT
                tournamentid,
                gameid,
                COUNT(DISTINCT playerid) as unique_players,
                AVG(currentscore) as avg_score,
                MAX(currentscore) as high_score,
                SUM(currentplaytime) as total_play_time,
                COUNT(*) as total_events
            FROM playstats
            GROUP BY tournamentid, gameid
            ORDER BY total_events DESC
            LIMIT 50
            ",
            expected_improvement: "50X",
        },
    ],
    create_indexes_sql: "
-- Leaderboard index
CREATE AGGREGATING INDEX IF NOT EXISTS playstats_leaderboard_agg
ON playstats (
    tournamentid, gameid, playerid,
    AVG(currentscore), SUM(currentplaytime), MAX(currentlevel), COUNT(*)
);

-- Daily metrics index
CREATE AGGREGATING INDEX IF NOT EXISTS playstats_daily_agg
ON playstats (
    gameid, DATE_TRUNC('day', stattime),
    SUM(currentplaytime), AVG(currentscore), COUNT(DISTINCT playerid), COUNT(*)
);

-- Player stats index
CREATE AGGREGATING INDEX IF NOT EXISTS playstats_player_agg
ON playstats (
    playerid, gameid,
    AVG(currentscore), SUM(currentplaytime), MAX(currentlevel),
    MIN(stattime), MAX(stattime), COUNT(*)
);

-- Tournament overview index
CREATE AGGREGATING INDEX IF NOT EXISTS playstats_tournament_agg
ON playstats (
    tournamentid, gameid,
    AVG(currentscore), MAX(currentscore), SUM(currentplaytime),
    COUNT(DISTINCT playerid), COUNT(*)
);
",
    drop_indexes_sql: "
DROP AGGREGATING INDEX IF EXISTS playstats_leaderboard_agg ON playstats;
DROP AGGREGATING INDEX IF EXISTS playstats_daily_agg ON playstats;
DROP AGGREGATING INDEX IF EXISTS playstats_player_agg ON playstats;
DROP AGGREGATING INDEX IF EXISTS playstats_tournament_agg ON playstats;
",
};

/// AdTech: campaign and publisher rollups over `impressions`.
pub const ADTECH: Suite = Suite {
    vertical: "adtech",
    title: "ADTECH",
    queries: &[
        SuiteQuery {
            name: "Campaign by Day",
            description: "Daily impressions and spend per campaign, last 30 days",
            sql: "
            SELECT campaign_id, DATE_TRUNC('day', timestamp) AS day,
                   COUNT(*) AS impressions, SUM(win_price) AS spend
            FROM impressions
            WHERE timestamp >= CURRENT_DATE - INTERVAL '30 days'
            GROUP BY campaign_id, DATE_TRUNC('day', timestamp)
            ORDER BY day DESC, impressions DESC LIMIT 100
            ",
            expected_improvement: "80X",
        },
        SuiteQuery {
            name: "Publisher Performance",
            description: "Revenue and reach per publisher, last 7 days",
            sql: "
            SELECT publisher_id, COUNT(*) AS impressions, SUM(win_price) AS revenue,
                   COUNT(DISTINCT campaign_id) AS campaigns_served
            FROM impressions
            WHERE timestamp >= CURRENT_DATE - INTERVAL '7 days'
            GROUP BY publisher_id ORDER BY revenue DESC LIMIT 50
            ",
            expected_improvement: "70X",
        },
    ],
    create_indexes_sql: "
CREATE AGGREGATING INDEX IF NOT EXISTS impressions_campaign_daily_agg
ON impressions (campaign_id, DATE_TRUNC('day', timestamp), COUNT(*), COUNT(DISTINCT user_id), SUM(win_price), AVG(win_price));

CREATE AGGREGATING INDEX IF NOT EXISTS impressions_publisher_agg
ON impressions (publisher_id, DATE_TRUNC('day', timestamp), COUNT(*), SUM(win_price), COUNT(DISTINCT campaign_id), COUNT(DISTINCT user_id));
",
    drop_indexes_sql: "
DROP AGGREGATING INDEX IF EXISTS impressions_campaign_daily_agg ON impressions;
DROP AGGREGATING INDEX IF EXISTS impressions_publisher_agg ON impressions;
",
};

/// E-commerce: product and revenue analytics over `order_items`.
pub const ECOMMERCE: Suite = Suite {
    vertical: "ecommerce",
    title: "E-COMMERCE",
    queries: &[
        SuiteQuery {
            name: "Product Sales by Category",
            description: "Sales by category and brand, last 30 days",
            sql: "
            SELECT
                p.category_id,
                p.brand,
                SUM(oi.quantity) AS total_quantity_sold,
                SUM(oi.subtotal) AS total_revenue,
                COUNT(DISTINCT oi.order_id) AS order_count,
                AVG(oi.unit_price) AS avg_price
            FROM order_items oi
            JOIN products p ON oi.product_id = p.product_id
            WHERE oi.created_at >= CURRENT_DATE - INTERVAL '30 days'
            GROUP BY p.category_id, p.brand
            ORDER BY total_revenue DESC
            LIMIT 50
            ",
            expected_improvement: "80X",
        },
        SuiteQuery {
            name: "Daily Revenue Trends",
            description: "Daily revenue for last 90 days",
            sql: "
            SELECT
                DATE_TRUNC('day', oi.created_at) AS day,
                COUNT(DISTINCT oi.order_id) AS order_count,
                SUM(oi.subtotal) AS total_revenue,
                AVG(oi.subtotal) AS avg_order_value
            FROM order_items oi
            WHERE oi.created_at >= CURRENT_DATE - INTERVAL '90 days'
            GROUP BY DATE_TRUNC('day', oi.created_at)
            ORDER BY day DESC
            LIMIT 90
            ",
            expected_improvement: "90X",
        },
        SuiteQuery {
            name: "Top Products by Revenue",
            description: "Top 20 products by revenue, last 7 days",
            sql: "
            SELECT
                oi.product_id,
                SUM(oi.quantity) AS total_quantity_sold,
                SUM(oi.subtotal) AS total_revenue,
                COUNT(DISTINCT oi.order_id) AS order_count
            FROM order_items oi
            WHERE oi.created_at >= CURRENT_DATE - INTERVAL '7 days'
            GROUP BY oi.product_id
            ORDER BY total_revenue DESC
            LIMIT 20
            ",
            expected_improvement: "70X",
        },
        SuiteQuery {
            name: "Brand Performance",
            description: "Revenue by brand, last 7 days",
            sql: "
            SELECT
                p.brand,
                COUNT(DISTINCT p.product_id) AS product_count,
                SUM(oi.quantity) AS total_quantity_sold,
                SUM(oi.subtotal) AS total_revenue
            FROM order_items oi
            JOIN products p ON oi.product_id = p.product_id
            WHERE oi.created_at >= CURRENT_DATE - INTERVAL '7 days'
            GROUP BY p.brand
            ORDER BY total_revenue DESC
            LIMIT 20
            ",
            expected_improvement: "70X",
        },
    ],
    create_indexes_sql: "
CREATE AGGREGATING INDEX IF NOT EXISTS order_items_product_sales_agg
ON order_items (
    product_id,
    DATE_TRUNC('day', created_at),
    SUM(quantity),
    SUM(subtotal),
    COUNT(DISTINCT order_id),
    AVG(unit_price),
    COUNT(*)
);

CREATE AGGREGATING INDEX IF NOT EXISTS order_items_daily_agg
ON order_items (
    DATE_TRUNC('day', created_at),
    SUM(subtotal),
    SUM(quantity),
    COUNT(DISTINCT order_id),
    COUNT(DISTINCT product_id),
    AVG(subtotal),
    COUNT(*)
);

CREATE AGGREGATING INDEX IF NOT EXISTS order_items_order_agg
ON order_items (
    order_id,
    SUM(subtotal),
    SUM(quantity),
    COUNT(DISTINCT product_id),
    COUNT(*)
);
",
    drop_indexes_sql: "
DROP AGGREGATING INDEX IF EXISTS order_items_product_sales_agg ON order_items;
DROP AGGREGATING INDEX IF EXISTS order_items_daily_agg ON order_items;
DROP AGGREGATING INDEX IF EXISTS order_items_order_agg ON order_items;
",
};

/// Financial: transaction volume and merchant rollups over `transactions`.
pub const FINANCIAL: Suite = Suite {
    vertical: "financial",
    title: "FINANCIAL",
    queries: &[
        SuiteQuery {
            name: "Transaction Volume by Day",
            description: "Daily volume per transaction type, last 30 days",
            sql: "
            SELECT DATE_TRUNC('day', timestamp) AS day, transaction_type,
                   COUNT(*) AS tx_count, SUM(amount) AS total_volume, AVG(amount) AS avg_amount
            FROM transactions
            WHERE timestamp >= CURRENT_DATE - INTERVAL '30 days'
            GROUP BY DATE_TRUNC('day', timestamp), transaction_type
            ORDER BY day DESC, total_volume DESC LIMIT 100
            ",
            expected_improvement: "80X",
        },
        SuiteQuery {
            name: "Merchant Performance",
            description: "Volume and risk per merchant, last 7 days",
            sql: "
            SELECT merchant_id, category, COUNT(*) AS tx_count,
                   SUM(amount) AS volume, AVG(risk_score) AS avg_risk_score
            FROM transactions
            WHERE timestamp >= CURRENT_DATE - INTERVAL '7 days'
            GROUP BY merchant_id, category ORDER BY volume DESC LIMIT 50
            ",
            expected_improvement: "75X",
        },
    ],
    create_indexes_sql: "
CREATE AGGREGATING INDEX IF NOT EXISTS transactions_daily_agg
ON transactions (DATE_TRUNC('day', timestamp), transaction_type, COUNT(*), SUM(amount), AVG(amount));

CREATE AGGREGATING INDEX IF NOT EXISTS transactions_merchant_agg
ON transactions (merchant_id, category, DATE_TRUNC('day', timestamp), COUNT(*), SUM(amount), AVG(risk_score));
",
    drop_indexes_sql: "
DROP AGGREGATING INDEX IF EXISTS transactions_daily_agg ON transactions;
DROP AGGREGATING INDEX IF EXISTS transactions_merchant_agg ON transactions;
",
};

/// Observability: log volume and error rates over `logs`.
pub const OBSERVABILITY: Suite = Suite {
    vertical: "observability",
    title: "OBSERVABILITY",
    queries: &[
        SuiteQuery {
            name: "Log Count by Service/Day",
            description: "Log volume per service, day and level, last 30 days",
            sql: "
            SELECT service_id, DATE_TRUNC('day', timestamp) AS day, level,
                   COUNT(*) AS log_count, AVG(duration_ms) AS avg_duration_ms
            FROM logs
            WHERE timestamp >= CURRENT_DATE - INTERVAL '30 days'
            GROUP BY service_id, DATE_TRUNC('day', timestamp), level
            ORDER BY day DESC, log_count DESC LIMIT 100
            ",
            expected_improvement: "80X",
        },
        SuiteQuery {
            name: "Error Rate by Service",
            description: "Error counts per service, last 7 days",
            sql: "
            SELECT service_id,
                   COUNT(*) FILTER (WHERE level = 'ERROR') AS error_count,
                   COUNT(*) AS total_count
            FROM logs
            WHERE timestamp >= CURRENT_DATE - INTERVAL '7 days'
            GROUP BY service_id ORDER BY error_count DESC LIMIT 50
            ",
            expected_improvement: "75X",
        },
    ],
    create_indexes_sql: "
CREATE AGGREGATING INDEX IF NOT EXISTS logs_service_daily_agg
ON logs (service_id, DATE_TRUNC('day', timestamp), level, COUNT(*), COUNT(DISTINCT endpoint_id), AVG(duration_ms));
",
    drop_indexes_sql: "
DROP AGGREGATING INDEX IF EXISTS logs_service_daily_agg ON logs;
",
};
