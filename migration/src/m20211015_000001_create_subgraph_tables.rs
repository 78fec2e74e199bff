use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Bundle singleton (id "1") holding the ETH/USD price
        manager
            .create_table(
                Table::create()
                    .table(Bundle::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Bundle::Id).string_len(8).not_null().primary_key())
                    .col(ColumnDef::new(Bundle::EthPriceUsd).decimal().not_null().default(0))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Factory::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Factory::Id).string_len(42).not_null().primary_key())
                    .col(ColumnDef::new(Factory::PoolCount).big_integer().not_null().default(0))
                    .col(ColumnDef::new(Factory::TotalVolumeEth).decimal().not_null().default(0))
                    .col(ColumnDef::new(Factory::TotalVolumeUsd).decimal().not_null().default(0))
                    .col(ColumnDef::new(Factory::UntrackedVolumeUsd).decimal().not_null().default(0))
                    .col(ColumnDef::new(Factory::TotalValueLockedEth).decimal().not_null().default(0))
                    .col(ColumnDef::new(Factory::TotalValueLockedUsd).decimal().not_null().default(0))
                    .col(ColumnDef::new(Factory::TxCount).big_integer().not_null().default(0))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Token::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Token::Id).string_len(42).not_null().primary_key())
                    .col(ColumnDef::new(Token::Symbol).string_len(64).not_null())
                    .col(ColumnDef::new(Token::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Token::Decimals).integer().not_null())
                    // Raw supply can exceed NUMERIC precision of the decimal columns
                    .col(ColumnDef::new(Token::TotalSupply).text().not_null())
                    .col(ColumnDef::new(Token::DerivedEth).decimal().not_null().default(0))
                    .col(ColumnDef::new(Token::Volume).decimal().not_null().default(0))
                    .col(ColumnDef::new(Token::VolumeUsd).decimal().not_null().default(0))
                    .col(ColumnDef::new(Token::UntrackedVolumeUsd).decimal().not_null().default(0))
                    .col(ColumnDef::new(Token::FeesUsd).decimal().not_null().default(0))
                    .col(ColumnDef::new(Token::TxCount).big_integer().not_null().default(0))
                    .col(ColumnDef::new(Token::PoolCount).big_integer().not_null().default(0))
                    .col(ColumnDef::new(Token::TotalValueLocked).decimal().not_null().default(0))
                    .col(ColumnDef::new(Token::TotalValueLockedUsd).decimal().not_null().default(0))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Pool::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Pool::Id).string_len(42).not_null().primary_key())
                    .col(ColumnDef::new(Pool::Token0).string_len(42).not_null())
                    .col(ColumnDef::new(Pool::Token1).string_len(42).not_null())
                    .col(ColumnDef::new(Pool::FeeTier).integer().not_null())
                    .col(ColumnDef::new(Pool::TickSpacing).integer().not_null().default(0))
                    .col(ColumnDef::new(Pool::CreatedAtTimestamp).big_integer().not_null())
                    .col(ColumnDef::new(Pool::CreatedAtBlockNumber).big_integer().not_null())
                    .col(ColumnDef::new(Pool::Liquidity).text().not_null())
                    .col(ColumnDef::new(Pool::SqrtPrice).text().not_null())
                    .col(ColumnDef::new(Pool::FeeGrowthGlobal0X128).text().not_null())
                    .col(ColumnDef::new(Pool::FeeGrowthGlobal1X128).text().not_null())
                    .col(ColumnDef::new(Pool::Token0Price).decimal().not_null().default(0))
                    .col(ColumnDef::new(Pool::Token1Price).decimal().not_null().default(0))
                    .col(ColumnDef::new(Pool::Tick).integer().null())
                    .col(ColumnDef::new(Pool::ObservationIndex).big_integer().not_null().default(0))
                    .col(ColumnDef::new(Pool::VolumeToken0).decimal().not_null().default(0))
                    .col(ColumnDef::new(Pool::VolumeToken1).decimal().not_null().default(0))
                    .col(ColumnDef::new(Pool::VolumeUsd).decimal().not_null().default(0))
                    .col(ColumnDef::new(Pool::UntrackedVolumeUsd).decimal().not_null().default(0))
                    .col(ColumnDef::new(Pool::FeesUsd).decimal().not_null().default(0))
                    .col(ColumnDef::new(Pool::TxCount).big_integer().not_null().default(0))
                    .col(ColumnDef::new(Pool::CollectedFeesToken0).decimal().not_null().default(0))
                    .col(ColumnDef::new(Pool::CollectedFeesToken1).decimal().not_null().default(0))
                    .col(ColumnDef::new(Pool::CollectedFeesUsd).decimal().not_null().default(0))
                    .col(ColumnDef::new(Pool::TotalValueLockedToken0).decimal().not_null().default(0))
                    .col(ColumnDef::new(Pool::TotalValueLockedToken1).decimal().not_null().default(0))
                    .col(ColumnDef::new(Pool::TotalValueLockedEth).decimal().not_null().default(0))
                    .col(ColumnDef::new(Pool::TotalValueLockedUsd).decimal().not_null().default(0))
                    .col(ColumnDef::new(Pool::LiquidityProviderCount).big_integer().not_null().default(0))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Cellar::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Cellar::Id).string_len(42).not_null().primary_key())
                    .col(ColumnDef::new(Cellar::Token0).string_len(42).not_null())
                    .col(ColumnDef::new(Cellar::Token1).string_len(42).not_null())
                    .col(ColumnDef::new(Cellar::Pool).string_len(42).not_null())
                    .col(ColumnDef::new(Cellar::FeeTier).integer().not_null())
                    .col(ColumnDef::new(Cellar::ManagementFee).integer().not_null())
                    .col(ColumnDef::new(Cellar::TotalDepositAmount0).decimal().not_null().default(0))
                    .col(ColumnDef::new(Cellar::TotalDepositAmount1).decimal().not_null().default(0))
                    .col(ColumnDef::new(Cellar::TotalDepositUsd).decimal().not_null().default(0))
                    .col(ColumnDef::new(Cellar::TotalValueLockedToken0).decimal().not_null().default(0))
                    .col(ColumnDef::new(Cellar::TotalValueLockedToken1).decimal().not_null().default(0))
                    .col(ColumnDef::new(Cellar::TotalValueLockedUsd).decimal().not_null().default(0))
                    .col(ColumnDef::new(Cellar::FeesCollectedToken0).decimal().not_null().default(0))
                    .col(ColumnDef::new(Cellar::FeesCollectedToken1).decimal().not_null().default(0))
                    .col(ColumnDef::new(Cellar::FeesCollectedUsd).decimal().not_null().default(0))
                    .col(ColumnDef::new(Cellar::FeesReinvestedToken0).decimal().not_null().default(0))
                    .col(ColumnDef::new(Cellar::FeesReinvestedToken1).decimal().not_null().default(0))
                    .col(ColumnDef::new(Cellar::FeesReinvestedUsd).decimal().not_null().default(0))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Nflp::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Nflp::Id).string_len(78).not_null().primary_key())
                    .col(ColumnDef::new(Nflp::Cellar).string_len(42).not_null())
                    .col(ColumnDef::new(Nflp::TickUpper).integer().not_null())
                    .col(ColumnDef::new(Nflp::TickLower).integer().not_null())
                    .col(ColumnDef::new(Nflp::Token0).string_len(42).not_null())
                    .col(ColumnDef::new(Nflp::Token1).string_len(42).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CellarInvest::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(CellarInvest::Id).string_len(64).not_null().primary_key())
                    .col(ColumnDef::new(CellarInvest::Cellar).string_len(42).not_null())
                    .col(ColumnDef::new(CellarInvest::Kind).string_len(16).not_null())
                    .col(ColumnDef::new(CellarInvest::BlockNumber).big_integer().not_null())
                    .col(ColumnDef::new(CellarInvest::BlockTimestamp).big_integer().not_null())
                    .col(ColumnDef::new(CellarInvest::BlockTime).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(CellarInvest::FeesCollectedToken0).decimal().not_null())
                    .col(ColumnDef::new(CellarInvest::FeesCollectedToken1).decimal().not_null())
                    .col(ColumnDef::new(CellarInvest::FeesCollectedUsd).decimal().not_null())
                    .col(ColumnDef::new(CellarInvest::FeesReinvestedToken0).decimal().not_null())
                    .col(ColumnDef::new(CellarInvest::FeesReinvestedToken1).decimal().not_null())
                    .col(ColumnDef::new(CellarInvest::FeesReinvestedUsd).decimal().not_null())
                    .col(ColumnDef::new(CellarInvest::Amount0).decimal().not_null())
                    .col(ColumnDef::new(CellarInvest::Amount1).decimal().not_null())
                    .col(ColumnDef::new(CellarInvest::AmountUsd).decimal().not_null())
                    .to_owned(),
            )
            .await?;

        // Positions and history are listed per cellar
        manager
            .create_index(
                Index::create()
                    .name("idx_nflp_cellar")
                    .table(Nflp::Table)
                    .col(Nflp::Cellar)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_cellar_invest_cellar")
                    .table(CellarInvest::Table)
                    .col(CellarInvest::Cellar)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CellarInvest::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Nflp::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Cellar::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Pool::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Token::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Factory::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Bundle::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Bundle {
    Table,
    Id,
    EthPriceUsd,
}

#[derive(Iden)]
enum Factory {
    Table,
    Id,
    PoolCount,
    TotalVolumeEth,
    TotalVolumeUsd,
    UntrackedVolumeUsd,
    TotalValueLockedEth,
    TotalValueLockedUsd,
    TxCount,
}

#[derive(Iden)]
enum Token {
    Table,
    Id,
    Symbol,
    Name,
    Decimals,
    TotalSupply,
    DerivedEth,
    Volume,
    VolumeUsd,
    UntrackedVolumeUsd,
    FeesUsd,
    TxCount,
    PoolCount,
    TotalValueLocked,
    TotalValueLockedUsd,
}

#[derive(Iden)]
enum Pool {
    Table,
    Id,
    Token0,
    Token1,
    FeeTier,
    TickSpacing,
    CreatedAtTimestamp,
    CreatedAtBlockNumber,
    Liquidity,
    SqrtPrice,
    #[iden = "fee_growth_global0_x128"]
    FeeGrowthGlobal0X128,
    #[iden = "fee_growth_global1_x128"]
    FeeGrowthGlobal1X128,
    Token0Price,
    Token1Price,
    Tick,
    ObservationIndex,
    VolumeToken0,
    VolumeToken1,
    VolumeUsd,
    UntrackedVolumeUsd,
    FeesUsd,
    TxCount,
    CollectedFeesToken0,
    CollectedFeesToken1,
    CollectedFeesUsd,
    TotalValueLockedToken0,
    TotalValueLockedToken1,
    TotalValueLockedEth,
    TotalValueLockedUsd,
    LiquidityProviderCount,
}

#[derive(Iden)]
enum Cellar {
    Table,
    Id,
    Token0,
    Token1,
    Pool,
    FeeTier,
    ManagementFee,
    TotalDepositAmount0,
    TotalDepositAmount1,
    TotalDepositUsd,
    TotalValueLockedToken0,
    TotalValueLockedToken1,
    TotalValueLockedUsd,
    FeesCollectedToken0,
    FeesCollectedToken1,
    FeesCollectedUsd,
    FeesReinvestedToken0,
    FeesReinvestedToken1,
    FeesReinvestedUsd,
}

#[derive(Iden)]
enum Nflp {
    Table,
    Id,
    Cellar,
    TickUpper,
    TickLower,
    Token0,
    Token1,
}

#[derive(Iden)]
enum CellarInvest {
    Table,
    Id,
    Cellar,
    Kind,
    BlockNumber,
    BlockTimestamp,
    BlockTime,
    FeesCollectedToken0,
    FeesCollectedToken1,
    FeesCollectedUsd,
    FeesReinvestedToken0,
    FeesReinvestedToken1,
    FeesReinvestedUsd,
    Amount0,
    Amount1,
    AmountUsd,
}
