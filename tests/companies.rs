#[cfg(test)]
mod tests {
    use daolab::db::companies::{Companies, CompanyDao};
    use daolab::db::data_source::{DataSource, SqliteDataSource};
    use daolab::libs::company::{Company, Product};
    use daolab::libs::config::DatabaseConfig;
    use daolab::libs::logging;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct CompanyTestContext {
        _temp_dir: TempDir,
        data_source: SqliteDataSource,
    }

    impl TestContext for CompanyTestContext {
        fn setup() -> Self {
            let _ = logging::init();
            let temp_dir = tempfile::tempdir().unwrap();
            let data_source = SqliteDataSource::open(temp_dir.path().join("companies.db"), DatabaseConfig::default()).unwrap();
            CompanyTestContext {
                _temp_dir: temp_dir,
                data_source,
            }
        }
    }

    #[test_context(CompanyTestContext)]
    #[test]
    fn test_save_and_fetch_products(ctx: &mut CompanyTestContext) {
        let dao = Companies::new(&ctx.data_source);
        let mut company = Company::new("Acme");
        company.add_product(Product::new("Anvil"));
        company.add_product(Product::new("Rocket skates"));

        dao.save(&mut company).unwrap();
        let company_id = company.id.unwrap();
        assert!(company.products().iter().all(|p| p.id.is_some()));
        assert!(company.products().iter().all(|p| p.company_id() == Some(company_id)));

        let loaded = dao.find_by_id_fetch_products(company_id).unwrap();
        assert_eq!(loaded, company);
        assert_eq!(loaded.name, "Acme");
        let names: Vec<&str> = loaded.products().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Anvil", "Rocket skates"]);
        assert!(loaded.products().iter().all(|p| p.company_id() == Some(company_id)));
    }

    #[test_context(CompanyTestContext)]
    #[test]
    fn test_fetch_only_own_products(ctx: &mut CompanyTestContext) {
        let dao = Companies::new(&ctx.data_source);
        let mut acme = Company::new("Acme");
        acme.add_product(Product::new("Anvil"));
        let mut globex = Company::new("Globex");
        globex.add_product(Product::new("Doomsday device"));
        globex.add_product(Product::new("Hammock"));
        dao.save(&mut acme).unwrap();
        dao.save(&mut globex).unwrap();

        let loaded = dao.find_by_id_fetch_products(globex.id.unwrap()).unwrap();
        assert_eq!(loaded.products().len(), 2);
        assert!(loaded.products().iter().all(|p| p.name != "Anvil"));
    }

    #[test_context(CompanyTestContext)]
    #[test]
    fn test_company_without_products(ctx: &mut CompanyTestContext) {
        let dao = Companies::new(&ctx.data_source);
        let mut company = Company::new("Initech");
        dao.save(&mut company).unwrap();

        let loaded = dao.find_by_id_fetch_products(company.id.unwrap()).unwrap();
        assert_eq!(loaded.name, "Initech");
        assert!(loaded.products().is_empty());
    }

    #[test_context(CompanyTestContext)]
    #[test]
    fn test_missing_company_fails(ctx: &mut CompanyTestContext) {
        let dao = Companies::new(&ctx.data_source);

        let err = dao.find_by_id_fetch_products(42).unwrap_err();
        assert_eq!(err.to_string(), "Company with id = 42 does not exist");
    }

    #[test_context(CompanyTestContext)]
    #[test]
    fn test_save_rejects_persisted_company(ctx: &mut CompanyTestContext) {
        let dao = Companies::new(&ctx.data_source);
        let mut company = Company::new("Acme");
        dao.save(&mut company).unwrap();

        assert!(dao.save(&mut company).is_err());

        let conn = ctx.data_source.get_connection().unwrap();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM company", [], |row| row.get(0)).unwrap();
        assert_eq!(count, 1);
    }
}
